use egui_kittest::Harness;
use kittest::Queryable;
use members_business::{BusinessConfig, Member, MembersTableState};
use members_ui::state::State;
use members_ui::widgets::members_panel;

/// Frames to run after an interaction so intents land and the UI redraws.
pub const UI_PROPAGATION_FRAMES: usize = 3;

pub fn ann_and_bo() -> Vec<Member> {
    vec![
        Member::new("1", "Ann", "a@x.com", "Admin"),
        Member::new("2", "Bo", "b@x.com", "User"),
    ]
}

#[allow(unused)]
pub fn numbered(count: usize) -> Vec<Member> {
    (1..=count)
        .map(|i| Member::new(i.to_string(), format!("User {i}"), format!("u{i}@x.com"), "member"))
        .collect()
}

/// A harness rendering only the members panel over an already loaded table.
pub fn panel_harness<'a>(members: Vec<Member>) -> Harness<'a, State> {
    panel_harness_with(BusinessConfig::default(), members)
}

pub fn panel_harness_with<'a>(config: BusinessConfig, members: Vec<Member>) -> Harness<'a, State> {
    let mut state = State::new(config);
    state
        .ctx
        .state_mut::<MembersTableState>()
        .populate(members, chrono::Utc::now());

    let mut harness = Harness::builder()
        .with_size(egui::vec2(1200.0, 900.0))
        .build_ui_state(
            |ui, state: &mut State| {
                members_panel(&mut state.ctx, ui);
            },
            state,
        );
    harness.step();
    harness
}

pub fn table<'h>(harness: &'h mut Harness<'_, State>) -> &'h mut MembersTableState {
    harness.state_mut().ctx.state_mut::<MembersTableState>()
}

pub fn settle(harness: &mut Harness<'_, State>) {
    for _ in 0..UI_PROPAGATION_FRAMES {
        harness.step();
    }
}

/// Focuses the `index`-th text input (in render order) and types `text` at
/// the end of its current value.
#[allow(unused)]
pub fn type_into(harness: &mut Harness<'_, State>, index: usize, text: &str) {
    harness
        .query_all_by_role(egui::accesskit::Role::TextInput)
        .nth(index)
        .expect("text input should be rendered")
        .focus();
    harness.step();
    harness.key_press(egui::Key::End);
    harness.step();
    harness
        .query_all_by_role(egui::accesskit::Role::TextInput)
        .nth(index)
        .expect("text input should still be rendered")
        .type_text(text);
    settle(harness);
}

/// Same as [`type_into`] for the last text input on screen.
#[allow(unused)]
pub fn type_into_last(harness: &mut Harness<'_, State>, text: &str) {
    let last = harness
        .query_all_by_role(egui::accesskit::Role::TextInput)
        .count()
        .checked_sub(1)
        .expect("at least one text input should be rendered");
    type_into(harness, last, text);
}
