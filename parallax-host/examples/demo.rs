use std::cell::RefCell;
use std::rc::Rc;

use parallax_core::Vec2;
use parallax_core::host::{Clipboard, EditorSurface, HostError, Notifier, Vault};
use parallax_editor::{FrameScheduler, Modifiers, SettingChange, SettingsPanel, collect};
use parallax_host::{BlockContext, SectionSpan, format_block, process_block, replace_block};

struct DemoVault;

impl Vault for DemoVault {
    fn resource_url(&self, path: &str) -> Result<Option<String>, HostError> {
        Ok(Some(format!("app://vault/{path}")))
    }

    fn files(&self) -> Vec<String> {
        vec!["images/back.png".to_string(), "images/front.png".to_string()]
    }
}

struct DemoSurface {
    lines: Vec<String>,
}

impl EditorSurface for DemoSurface {
    fn active_document(&self) -> Option<String> {
        Some("note.md".to_string())
    }

    fn replace_lines(&mut self, from: usize, to: usize, text: &str) -> Result<(), HostError> {
        let replacement = text.trim_end_matches('\n').lines().map(str::to_string);
        self.lines.splice(from..to, replacement);
        Ok(())
    }

    fn insert_at_cursor(&mut self, text: &str) -> Result<(), HostError> {
        self.lines.extend(text.lines().map(str::to_string));
        Ok(())
    }
}

struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&self, message: &str) {
        println!("[notice] {message}");
    }
}

struct DemoClipboard;

impl Clipboard for DemoClipboard {
    fn write_text(&mut self, text: &str) {
        println!("[clipboard] {} bytes", text.len());
    }
}

struct DemoScheduler(Rc<RefCell<bool>>);

impl FrameScheduler for DemoScheduler {
    fn request_frame(&mut self) {
        *self.0.borrow_mut() = true;
    }
}

fn main() {
    tracing_subscriber::fmt().init();

    let source = r#"{
  "width": 360,
  "height": 200,
  "badge": "NEW",
  "layers": [
    { "src": "images/back.png", "depth": -2 },
    { "src": "images/front.png", "depth": 1 }
  ]
}"#;

    let frame_requested = Rc::new(RefCell::new(false));
    let mut card = process_block(
        source,
        &DemoVault,
        Box::new(DemoScheduler(Rc::clone(&frame_requested))),
        Rc::new(StdoutNotifier),
    )
    .expect("demo block is valid");
    println!("Mounted card with {} layers", card.parts().layers.len());

    // Sweep the pointer across the card, painting a frame every third event.
    for step in 0..30 {
        card.pointer_move(Vec2::new(12.0 * step as f64, 100.0));
        if frame_requested.replace(false) {
            card.on_frame();
        }
    }
    println!(
        "Tilt after sweep: rotX {:.2} rotY {:.2}",
        card.state().rot_x,
        card.state().rot_y
    );

    // Shift-drag the card and resize its box.
    card.pointer_down(Vec2::new(180.0, 100.0), Modifiers { shift: true });
    card.drag_move(Vec2::new(220.0, 80.0));
    card.pointer_up();
    card.resized(480.0, 270.0);

    // Edit through the settings panel and copy the result.
    let mut panel = SettingsPanel::open(&card);
    panel.apply(&mut card, SettingChange::Scale(1.2));
    panel.apply(&mut card, SettingChange::Badge("SALE".to_string()));
    panel.copy(&card, &mut DemoClipboard);

    // Write the edited block back into the document.
    let updated = collect(&card);
    let mut surface = DemoSurface {
        lines: vec![
            "# demo note".to_string(),
            "```parallax".to_string(),
            "{}".to_string(),
            "```".to_string(),
        ],
    };
    let ctx = BlockContext {
        source_path: "note.md".to_string(),
        section: Some(SectionSpan {
            line_start: 1,
            line_end: 4,
        }),
    };
    replace_block(&updated, &ctx, &mut surface, &StdoutNotifier).expect("replace succeeds");

    println!("--- document after replace ---");
    println!("{}", surface.lines.join("\n"));
    println!("--- block for a fresh insert ---");
    print!("{}", format_block(&updated));

    card.teardown();
}
