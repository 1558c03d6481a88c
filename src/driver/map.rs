//! Mnemonics of the controller commands

macro_rules! makepl {
    ($($name:ident, $val:literal),*) => {
        $(pub const $name: &str = $val;)*
    };
}

#[rustfmt::skip]
makepl!(
    SERVO_ON, "SERVO ON",
    SERVO_OFF, "SERVO OFF",
    WHERE, "?WHRXY",
    MANUAL, "MANUAL",
    EMERGENCY_RESET, "EMGRST",
    MOVE, "MOVE P,",
    SYSTEM, "SYSTEM",
    WRITE_PROGRAM, "WRITE PGM",
    WRITE_POINTS, "WRITE PNT",
    AUTO, "AUTO",
    SWITCH_PROGRAM, "SWI",
    RUN, "RUN",
    PROGRAM_NAME, "NAME="
);
