use super::{Command, DEFAULT_SPEED};

#[test]
fn fixed_commands() {
    assert_eq!(Command::ServoOn.to_string(), "@SERVO ON \r");
    assert_eq!(Command::ServoOff.to_string(), "@SERVO OFF \r");
    assert_eq!(Command::Where.to_string(), "@?WHRXY \r");
    assert_eq!(Command::Manual.to_string(), "@MANUAL \r");
    assert_eq!(Command::EmergencyReset.to_string(), "@EMGRST \r");
}

#[test]
fn move_one_decimal() {
    let c = Command::Move {
        x: 123.45,
        y: 7.0,
        speed: DEFAULT_SPEED,
    };
    assert_eq!(c.to_string(), "@MOVE P, 123.5 7.0 0 0 0 0, S=2 \r");
}

#[test]
fn move_bounds() {
    let c = Command::Move {
        x: 650.0,
        y: 0.0,
        speed: 50,
    };
    assert_eq!(c.to_string(), "@MOVE P, 650.0 0.0 0 0 0 0, S=50 \r");
}

#[test]
fn named() {
    assert_eq!(Command::Named("AUTO").to_string(), "@AUTO \r\n");
    assert_eq!(Command::Named("WRITE PGM").to_string(), "@WRITE PGM \r\n");
}

#[test]
fn data_has_no_prefix() {
    let c = Command::Data("NAME=MYPROG\r\nMOVE P,P1\r\n");
    assert_eq!(c.to_string(), "NAME=MYPROG\r\nMOVE P,P1\r\n \r\n");
}

#[test]
fn fixed_commands_are_stable() {
    assert_eq!(Command::ServoOn.to_string(), Command::ServoOn.to_string());
}
