// Localized console output.

#[macro_export]
macro_rules! tr {
    ($msg:literal $(, $k:ident = $v:expr )* $(,)?) => {{
        $crate::i18n::lookup($msg, &[ $( (stringify!($k), ($v).to_string()) ),* ])
    }};
}

#[macro_export]
macro_rules! ui_ok {
    ($k:literal $(, $n:ident = $v:expr )* $(,)?) => {{
        println!("✔ {}", $crate::tr!($k $(, $n = $v )* ));
    }};
}

#[macro_export]
macro_rules! ui_info {
    ($k:literal $(, $n:ident = $v:expr )* $(,)?) => {{
        eprintln!("ℹ {}", $crate::tr!($k $(, $n = $v )* ));
    }};
}

#[macro_export]
macro_rules! ui_warn {
    ($k:literal $(, $n:ident = $v:expr )* $(,)?) => {{
        let icons = std::io::IsTerminal::is_terminal(&std::io::stderr())
            && std::env::var_os("NO_ICONS").is_none();
        if icons {
            eprintln!("⚠ {}", $crate::tr!($k $(, $n = $v )* ));
        } else {
            eprintln!("{}", $crate::tr!($k $(, $n = $v )* ));
        }
    }};
}

#[macro_export]
macro_rules! ui_out {
    ($k:literal $(, $n:ident = $v:expr )* $(,)?) => {{
        println!("{}", $crate::tr!($k $(, $n = $v )* ));
    }};
}
