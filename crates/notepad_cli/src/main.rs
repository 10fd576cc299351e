//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `notepad_core` linkage.
//! - Print a deterministic style-serialization sample for quick sanity checks.

use notepad_core::{NotepadPreferences, NotepadView};

fn main() {
    println!("notepad_core ping={}", notepad_core::ping());
    println!("notepad_core version={}", notepad_core::core_version());

    let mut view = NotepadView::new(NotepadPreferences::default());
    view.restore_session(None);
    view.set_text("hello world");
    if let Err(err) = view.set_selection(0, 5) {
        eprintln!("notepad_core sample failed: {err}");
        std::process::exit(1);
    }
    view.bold();
    view.underline();

    let style = view
        .active_tab()
        .map(|tab| tab.serialize_style())
        .unwrap_or_default();
    println!("notepad_core sample_style={style}");
}
