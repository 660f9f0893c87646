use super::*;

#[test]
fn draw_command_carries_cell_and_color() {
    let cmd = draw_command(12, 99, 15);
    assert_eq!(cmd, DrawCommand { x: 12, y: 99, color: 15 });
    assert!(cmd.validate().is_ok());
}

#[test]
fn draw_command_out_of_range_is_refused_by_validation() {
    let cmd = draw_command(u32::MAX, 0, 1);
    assert_eq!(cmd.x, i64::from(u32::MAX));
    assert!(cmd.validate().is_err());
}

#[test]
fn cooldown_failure_message_shows_remaining_time() {
    let msg = draw_failure_message(&DrawFailure::Cooldown { remaining_secs: 1.5 });
    assert_eq!(msg.as_deref(), Some("Wait 1.5s before placing another pixel."));
}

#[test]
fn unauthorized_failure_has_no_message() {
    assert_eq!(draw_failure_message(&DrawFailure::Unauthorized), None);
}

#[test]
fn rejected_failure_echoes_reason() {
    let msg = draw_failure_message(&DrawFailure::Rejected("Invalid color value".to_owned()));
    assert_eq!(msg.as_deref(), Some("Draw failed: Invalid color value"));
}
