#![allow(unused_macros)]
// Diagnostics go to stderr; stdout is reserved for generated output.
macro_rules! verbose_println {
    ($($p:expr),+) => {
        if (config::ARGS.verbose) {
            eprintln!($($p),+);
        }
    }
}
macro_rules! info {
    ($($p:expr),+) => {
        eprintln!(concat!(blue!("INFO"),": {}"),format_args!($($p),+))
    }
}

macro_rules! warn {
    ($($p:expr),+) => {
        eprintln!(concat!(red!("WARNING"),": {}"),format_args!($($p),+))
    }
}
macro_rules! line_err {
    ($line:expr, $kind:expr, $msg:expr) => {
        Error::new($kind, None, format!("line {} {}", $line, $msg).as_str())
    };
}
macro_rules! general_err {
    ($msg:expr) => {
        Error::new(crate::ErrorKind::General, None, format!("{}", $msg).as_str())
    };
}
macro_rules! syntax_err_line {
    ($line:expr, $msg:expr) => {
        Error::new(
            ErrorKind::Syntax,
            None,
            format!("{}, line {}: {}", red!("Syntax Error"), $line, $msg).as_str(),
        )
    };
}
macro_rules! invariant_err {
    ($kind:expr, $ctx:expr, $($msg:expr),*) => {
        Error::new(
            $kind,
            $ctx,
            format!("{} {}", red!("Invariant Violation"), format!($($msg),*)).as_str(),
        )
    };
}
macro_rules! color {
    ($color: literal, $msg: expr) => {
        concat!("\x1b[", $color, "m", $msg, "\x1b[0m")
    };
}
macro_rules! red {
    ($msg:expr) => {
        color!(91, $msg)
    };
}
macro_rules! green {
    ($msg:expr) => {
        color!(92, $msg)
    };
}
macro_rules! yellow {
    ($msg:expr) => {
        color!(93, $msg)
    };
}
macro_rules! blue {
    ($msg:expr) => {
        color!(94, $msg)
    };
}
