//! Global remote-control shortcuts with repeat debouncing.
//!
//! While a remote button is held, the infrared decoder does not re-send the
//! button's code; it sends a fixed "repeat" sentinel instead. The
//! [`CommandTable`] turns that sentinel back into "the last command, again",
//! but accepts at most one repeat per repeat delay so a held button cannot
//! fire a handler on every frame.
//!
//! Lookup is a linear scan in registration order and the first entry with a
//! matching code wins. Registering a code twice is allowed, but the later
//! entry can never fire; a warning is logged when that happens.

use alloc::boxed::Box;
use alloc::vec::Vec;
use embassy_time::{Duration, Instant};
use log::{debug, info, warn};

use crate::config::{DEFAULT_REPEAT_CODE, DEFAULT_REPEAT_DELAY_MS, UiConfig};
use crate::ui::core::{Action, InputResult};

/// Handler invoked when its code is dispatched.
///
/// Handlers that only cause side effects return `None`; returning an
/// [`Action`] hands it to the compositor.
pub type CommandHandler = Box<dyn FnMut() -> Option<Action>>;

struct CommandEntry {
    code: u32,
    handler: CommandHandler,
    description: &'static str,
}

/// Registry mapping remote codes to handlers, independent of the active view.
pub struct CommandTable {
    entries: Vec<CommandEntry>,
    last: Option<(u32, Instant)>,
    repeat_code: u32,
    repeat_delay: Duration,
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new(
            DEFAULT_REPEAT_CODE,
            Duration::from_millis(DEFAULT_REPEAT_DELAY_MS as u64),
        )
    }
}

impl CommandTable {
    pub fn new(repeat_code: u32, repeat_delay: Duration) -> Self {
        Self {
            entries: Vec::new(),
            last: None,
            repeat_code,
            repeat_delay,
        }
    }

    pub fn from_config(config: &UiConfig) -> Self {
        Self::new(config.keys.repeat, config.repeat_delay())
    }

    /// Append a command.
    pub fn register(&mut self, code: u32, handler: CommandHandler, description: &'static str) {
        if let Some(existing) = self.entries.iter().find(|e| e.code == code) {
            warn!(
                "Code 0x{:06X} ({}) already bound to {}; new entry is unreachable",
                code, description, existing.description
            );
        }
        self.entries.push(CommandEntry {
            code,
            handler,
            description,
        });
    }

    /// Append a command that always yields `action`.
    pub fn register_action(&mut self, code: u32, action: Action, description: &'static str) {
        self.register(code, Box::new(move || Some(action)), description);
    }

    /// Remove every command and forget the last dispatched code.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.last = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered `(code, description)` pairs in lookup order.
    pub fn entries(&self) -> impl Iterator<Item = (u32, &'static str)> + '_ {
        self.entries.iter().map(|e| (e.code, e.description))
    }

    /// The most recently dispatched code.
    pub fn last_code(&self) -> Option<u32> {
        self.last.map(|(code, _)| code)
    }

    pub fn repeat_delay(&self) -> Duration {
        self.repeat_delay
    }

    /// Log the command list at info level.
    pub fn log_commands(&self) {
        info!("Available remote commands:");
        for (code, description) in self.entries() {
            info!("Code: 0x{:06X} - {}", code, description);
        }
    }

    /// Run the handler bound to `code`.
    ///
    /// The repeat sentinel re-runs the previous command, but only once
    /// `repeat_delay` has passed since it last ran. Unknown codes leave the
    /// repeat state untouched.
    pub fn dispatch(&mut self, code: u32, now: Instant) -> InputResult {
        let code = if code == self.repeat_code {
            let Some((last_code, last_time)) = self.last else {
                return InputResult::NotHandled;
            };
            // A clock that went backwards counts as "too soon"
            match now.checked_duration_since(last_time) {
                Some(elapsed) if elapsed >= self.repeat_delay => last_code,
                _ => return InputResult::NotHandled,
            }
        } else {
            code
        };

        let Some(entry) = self.entries.iter_mut().find(|e| e.code == code) else {
            return InputResult::NotHandled;
        };

        debug!("Dispatching 0x{:06X} ({})", code, entry.description);
        let action = (entry.handler)();
        self.last = Some((code, now));

        match action {
            Some(action) => InputResult::Action(action),
            None => InputResult::Handled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::core::ViewId;
    use alloc::rc::Rc;
    use core::cell::Cell;

    const INC: u32 = 0x01;
    const DEC: u32 = 0x02;
    const REPEAT: u32 = 0xFFFF_FFFF;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    /// Table with `inc`/`dec` handlers acting on a shared counter.
    fn counter_table() -> (CommandTable, Rc<Cell<i32>>) {
        let counter = Rc::new(Cell::new(0));
        let mut table = CommandTable::default();

        let c = counter.clone();
        table.register(
            INC,
            Box::new(move || {
                c.set(c.get() + 1);
                None
            }),
            "inc",
        );
        let c = counter.clone();
        table.register(
            DEC,
            Box::new(move || {
                c.set(c.get() - 1);
                None
            }),
            "dec",
        );
        (table, counter)
    }

    #[test]
    fn test_empty_table_matches_nothing() {
        let mut table = CommandTable::default();
        assert!(!table.dispatch(INC, at(0)).matched());
        assert!(!table.dispatch(REPEAT, at(1000)).matched());
    }

    #[test]
    fn test_dispatch_invokes_handler_and_records_code() {
        let (mut table, counter) = counter_table();
        assert_eq!(table.dispatch(DEC, at(100)), InputResult::Handled);
        assert_eq!(counter.get(), -1);
        assert_eq!(table.last_code(), Some(DEC));
    }

    #[test]
    fn test_repeat_inside_delay_is_rejected() {
        let (mut table, counter) = counter_table();
        table.dispatch(DEC, at(1_000));

        assert!(!table.dispatch(REPEAT, at(1_000)).matched());
        assert!(!table.dispatch(REPEAT, at(1_249)).matched());
        assert_eq!(counter.get(), -1);
    }

    #[test]
    fn test_repeat_after_delay_reinvokes_last_handler() {
        let (mut table, counter) = counter_table();
        table.dispatch(DEC, at(1_000));

        assert!(table.dispatch(REPEAT, at(1_250)).matched());
        assert_eq!(counter.get(), -2);

        // The window restarts from the accepted repeat
        assert!(!table.dispatch(REPEAT, at(1_400)).matched());
        assert!(table.dispatch(REPEAT, at(1_500)).matched());
        assert_eq!(counter.get(), -3);
        assert_eq!(table.last_code(), Some(DEC));
    }

    #[test]
    fn test_repeat_without_history_is_rejected() {
        let (mut table, counter) = counter_table();
        assert!(!table.dispatch(REPEAT, at(10_000)).matched());
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn test_repeat_with_clock_going_backwards_is_rejected() {
        let (mut table, counter) = counter_table();
        table.dispatch(INC, at(5_000));
        assert!(!table.dispatch(REPEAT, at(1_000)).matched());
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn test_unknown_code_keeps_repeat_state() {
        let (mut table, counter) = counter_table();
        table.dispatch(INC, at(0));
        assert!(!table.dispatch(0x99, at(300)).matched());
        assert_eq!(table.last_code(), Some(INC));

        assert!(table.dispatch(REPEAT, at(300)).matched());
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn test_first_registration_wins() {
        let (mut table, counter) = counter_table();
        table.register_action(INC, Action::Custom(9), "shadowed");
        assert_eq!(table.len(), 3);

        assert_eq!(table.dispatch(INC, at(0)), InputResult::Handled);
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn test_action_handlers_return_action() {
        let mut table = CommandTable::default();
        table.register_action(0xF720DF, Action::ShowView(ViewId(1)), "graph");
        assert_eq!(
            table.dispatch(0xF720DF, at(0)),
            InputResult::Action(Action::ShowView(ViewId(1)))
        );
    }

    #[test]
    fn test_clear_forgets_entries_and_history() {
        let (mut table, _) = counter_table();
        table.dispatch(INC, at(0));
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.last_code(), None);
        assert!(!table.dispatch(REPEAT, at(1_000)).matched());
    }

    #[test]
    fn test_entries_in_registration_order() {
        let (table, _) = counter_table();
        let listed: Vec<_> = table.entries().collect();
        assert_eq!(listed, [(INC, "inc"), (DEC, "dec")]);
    }
}
