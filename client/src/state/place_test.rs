use super::*;

fn event(x: u32, y: u32, color: u8) -> DrawEvent {
    DrawEvent { x, y, color, user: "ada".to_owned(), timestamp: "2024-01-01T00:00:00Z".to_owned() }
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_board_is_blank_and_full_size() {
    let state = PlaceState::default();
    assert_eq!(state.pixels.len(), PIXEL_COUNT);
    assert!(state.pixels.iter().all(|&c| c == 0));
    assert!(!state.loaded);
    assert_eq!(state.delay_secs, DEFAULT_DRAW_DELAY_SECS);
}

#[test]
fn connection_status_default_is_disconnected() {
    assert_eq!(ConnectionStatus::default(), ConnectionStatus::Disconnected);
}

// =============================================================
// load_bitmap
// =============================================================

#[test]
fn load_bitmap_pads_short_payload() {
    let mut state = PlaceState::default();
    state.load_bitmap(vec![5, 6]);
    assert_eq!(state.pixels.len(), PIXEL_COUNT);
    assert_eq!(state.color_at(0, 0), Some(5));
    assert_eq!(state.color_at(1, 0), Some(6));
    assert_eq!(state.color_at(2, 0), Some(0));
    assert!(state.loaded);
}

#[test]
fn load_bitmap_truncates_and_masks() {
    let mut state = PlaceState::default();
    let mut colors = vec![0x1F; PIXEL_COUNT + 10];
    colors[0] = 3;
    state.load_bitmap(colors);
    assert_eq!(state.pixels.len(), PIXEL_COUNT);
    assert_eq!(state.color_at(0, 0), Some(3));
    assert_eq!(state.color_at(1, 0), Some(0x0F));
}

#[test]
fn load_bitmap_bumps_revision() {
    let mut state = PlaceState::default();
    state.load_bitmap(Vec::new());
    assert_eq!(state.revision, 1);
}

// =============================================================
// set_pixel / apply_draw
// =============================================================

fn loaded() -> PlaceState {
    let mut state = PlaceState::default();
    state.load_bitmap(Vec::new());
    state
}

#[test]
fn apply_draw_updates_pixel_and_revision() {
    let mut state = loaded();
    assert!(state.apply_draw(&event(10, 20, 7)));
    assert_eq!(state.color_at(10, 20), Some(7));
    assert_eq!(state.revision, 2);
}

#[test]
fn apply_draw_same_color_is_noop() {
    let mut state = loaded();
    assert!(!state.apply_draw(&event(0, 0, 0)));
    assert_eq!(state.revision, 1);
}

#[test]
fn apply_draw_before_load_is_queued_then_replayed() {
    let mut state = PlaceState::default();
    assert!(!state.apply_draw(&event(1, 1, 4)));
    assert!(!state.apply_draw(&event(1, 1, 9)));
    assert_eq!(state.pending.len(), 2);
    assert_eq!(state.color_at(1, 1), Some(0));

    state.load_bitmap(vec![0; PIXEL_COUNT]);
    assert!(state.pending.is_empty());
    assert_eq!(state.color_at(1, 1), Some(9));
}

#[test]
fn resync_after_reconnect_keeps_pixels_and_queues_events() {
    let mut state = loaded();
    state.set_pixel(4, 4, 2);
    state.begin_resync();
    assert!(!state.loaded);
    assert_eq!(state.color_at(4, 4), Some(2));

    assert!(!state.apply_draw(&event(8, 8, 6)));
    assert_eq!(state.color_at(8, 8), Some(0));

    // The refetched board carries a draw missed while the socket was down.
    let mut fresh = vec![0; PIXEL_COUNT];
    fresh[pixel_index(4, 4).expect("in range")] = 2;
    fresh[pixel_index(30, 1).expect("in range")] = 13;
    state.load_bitmap(fresh);
    assert!(state.loaded);
    assert_eq!(state.color_at(30, 1), Some(13));
    assert_eq!(state.color_at(8, 8), Some(6));
    assert!(state.pending.is_empty());
}

#[test]
fn reset_board_keeps_palette_and_cooldown() {
    let mut state = loaded();
    state.select_color(3);
    state.record_draw(1_000.0);
    state.set_pixel(2, 2, 5);
    state.reset_board();
    assert!(!state.loaded);
    assert_eq!(state.color_at(2, 2), Some(0));
    assert_eq!(state.selected_color, 3);
    assert_eq!(state.last_draw_ms, Some(1_000.0));
    assert_eq!(state.connection_status, ConnectionStatus::Disconnected);
}

#[test]
fn set_pixel_ignores_out_of_bounds_and_bad_color() {
    let mut state = PlaceState::default();
    assert!(!state.set_pixel(100, 0, 1));
    assert!(!state.set_pixel(0, 0, 16));
    assert_eq!(state.revision, 0);
}

#[test]
fn select_color_rejects_out_of_palette() {
    let mut state = PlaceState::default();
    state.select_color(9);
    state.select_color(16);
    assert_eq!(state.selected_color, 9);
}

// =============================================================
// Cooldown
// =============================================================

#[test]
fn no_previous_draw_means_no_cooldown() {
    let state = PlaceState::default();
    assert!(state.can_draw(1_000.0));
    assert!((state.cooldown_remaining_ms(1_000.0)).abs() < f64::EPSILON);
}

#[test]
fn cooldown_counts_down_from_delay() {
    let mut state = PlaceState::default();
    state.record_draw(10_000.0);
    assert!((state.cooldown_remaining_ms(10_500.0) - 1_500.0).abs() < f64::EPSILON);
    assert!(!state.can_draw(11_999.0));
    assert!(state.can_draw(12_000.0));
}

#[test]
fn cooldown_is_clamped_when_clock_goes_backwards() {
    let mut state = PlaceState::default();
    state.record_draw(10_000.0);
    assert!((state.cooldown_remaining_ms(5_000.0) - 2_000.0).abs() < f64::EPSILON);
}

#[test]
fn restore_cooldown_reproduces_remaining_time() {
    let mut state = PlaceState::default();
    state.restore_cooldown(1.25, 50_000.0);
    assert!((state.cooldown_remaining_ms(50_000.0) - 1_250.0).abs() < 1e-6);
}

#[test]
fn restore_cooldown_clamps_to_delay() {
    let mut state = PlaceState::default();
    state.restore_cooldown(99.0, 50_000.0);
    assert!((state.cooldown_remaining_ms(50_000.0) - 2_000.0).abs() < 1e-6);
}
