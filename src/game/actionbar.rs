// Action bar: twelve power hotkeys
//
// Slots 0-9 follow the numbered bar keys, slot 10 is the primary pointer
// button and slot 11 the secondary one.

use crate::engine::input::{Action, InputState, BAR_KEYS};
use crate::game::persistence::HotkeyPort;
use crate::game::powers::PowerId;

pub const HOTKEY_SLOTS: usize = 12;

/// Saved value of an empty hotkey
pub const EMPTY_HOTKEY: i32 = -1;

pub const SLOT_MAIN1: usize = 10;
pub const SLOT_MAIN2: usize = 11;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionBar {
    hotkeys: [Option<PowerId>; HOTKEY_SLOTS],
}

impl ActionBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swing on the primary button, shoot on the secondary, the rest on the
    /// number keys
    pub fn with_starter_powers() -> Self {
        let mut bar = Self::new();
        bar.assign(SLOT_MAIN1, Some(1));
        bar.assign(SLOT_MAIN2, Some(2));
        bar.assign(0, Some(3));
        bar.assign(1, Some(4));
        bar.assign(2, Some(5));
        bar
    }

    pub fn assign(&mut self, slot: usize, power: Option<PowerId>) {
        if let Some(hotkey) = self.hotkeys.get_mut(slot) {
            *hotkey = power;
        }
    }

    pub fn hotkey(&self, slot: usize) -> Option<PowerId> {
        self.hotkeys.get(slot).copied().flatten()
    }

    /// Input action that triggers a slot
    fn slot_action(slot: usize) -> Action {
        match slot {
            SLOT_MAIN1 => Action::Main1,
            SLOT_MAIN2 => Action::Main2,
            bar => Action::Bar(bar as u8),
        }
    }

    /// Power held down this frame, lowest slot first
    pub fn selected_power(&self, input: &InputState) -> Option<PowerId> {
        (0..BAR_KEYS as usize)
            .chain([SLOT_MAIN1, SLOT_MAIN2])
            .filter(|slot| input.pressing(Self::slot_action(*slot)))
            .find_map(|slot| self.hotkey(slot))
    }
}

impl HotkeyPort for ActionBar {
    fn hotkeys(&self) -> [i32; HOTKEY_SLOTS] {
        self.hotkeys
            .map(|hotkey| hotkey.map_or(EMPTY_HOTKEY, |power| power as i32))
    }

    /// Negative values clear the slot
    fn set_hotkeys(&mut self, hotkeys: [i32; HOTKEY_SLOTS]) {
        self.hotkeys = hotkeys.map(|value| PowerId::try_from(value).ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bar_selects_nothing() {
        let bar = ActionBar::new();
        let mut input = InputState::new();
        input.press(Action::Main1);
        assert_eq!(bar.selected_power(&input), None);
    }

    #[test]
    fn test_pointer_buttons_map_to_last_slots() {
        let bar = ActionBar::with_starter_powers();
        let mut input = InputState::new();

        input.press(Action::Main2);
        assert_eq!(bar.selected_power(&input), Some(2));

        input.press(Action::Main1);
        assert_eq!(bar.selected_power(&input), Some(1));
    }

    #[test]
    fn test_bar_keys_win_over_pointer() {
        let bar = ActionBar::with_starter_powers();
        let mut input = InputState::new();
        input.press(Action::Main1);
        input.press(Action::Bar(2));
        assert_eq!(bar.selected_power(&input), Some(5));
    }

    #[test]
    fn test_empty_held_slot_falls_through() {
        let bar = ActionBar::with_starter_powers();
        let mut input = InputState::new();
        input.press(Action::Bar(7));
        input.press(Action::Main2);
        assert_eq!(bar.selected_power(&input), Some(2));
    }

    #[test]
    fn test_hotkey_port_uses_minus_one_for_empty() {
        let mut bar = ActionBar::with_starter_powers();
        let saved = bar.hotkeys();
        assert_eq!(saved, [3, 4, 5, -1, -1, -1, -1, -1, -1, -1, 1, 2]);

        bar.set_hotkeys([-1; HOTKEY_SLOTS]);
        assert_eq!(bar, ActionBar::new());

        bar.set_hotkeys(saved);
        assert_eq!(bar, ActionBar::with_starter_powers());
    }

    #[test]
    fn test_assign_out_of_range_ignored() {
        let mut bar = ActionBar::new();
        bar.assign(40, Some(1));
        assert_eq!(bar, ActionBar::new());
    }
}
