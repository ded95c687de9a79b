// Status lines for humans, looked up in the Fluent bundle under i18n/.
// They go to stderr; stdout carries command output.

#[macro_export]
macro_rules! tr {
    ($msg:literal $(, $k:ident = $v:expr )* $(,)?) => {{
        let loader = $crate::LANG_LOADER.get().expect("i18n not initialized");
        i18n_embed_fl::fl!(loader, $msg $(, $k = $v )* )
    }};
}

#[macro_export]
macro_rules! ui_ok {
    ($use_color:expr, $k:literal $(, $n:ident = $v:expr )* $(,)?) => {{
        let msg = $crate::tr!($k $(, $n = $v )* );
        if $use_color {
            use owo_colors::OwoColorize;
            eprintln!("{} {}", "✔".green(), msg);
        } else {
            eprintln!("✔ {}", msg);
        }
    }};
}

#[macro_export]
macro_rules! ui_warn {
    ($use_color:expr, $k:literal $(, $n:ident = $v:expr )* $(,)?) => {{
        let msg = $crate::tr!($k $(, $n = $v )* );
        if $use_color {
            use owo_colors::OwoColorize;
            eprintln!("{} {}", "⚠".yellow(), msg);
        } else {
            eprintln!("⚠ {}", msg);
        }
    }};
}
