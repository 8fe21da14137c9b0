pub mod dialogs;
pub mod keybindings;
pub mod progress;
pub mod prompt;
pub mod terminal_guard;
pub mod wizard_screen;

pub use dialogs::{PromptDialog, PromptKind};
pub use progress::TuiProgress;
pub use prompt::{PromptRequest, TuiPrompt};
pub use terminal_guard::{install_panic_hook, TerminalGuard};
pub use wizard_screen::{WizardAction, WizardScreen};
