//! Replays a scripted key sequence against a keymap file and prints what fired.
//!
//! Usage: cargo run --example replay -- [path/to/file.keymap]

use keyroute_core::{
    keymap, ActionRegistry, ConfirmDialog, Engine, HostState, KeyEvent, LayoutError, LayoutMap,
    Modifiers, NeutralTarget, TargetId,
};
use std::path::PathBuf;

const BODY: TargetId = TargetId(1);
const SEARCH_BOX: TargetId = TargetId(2);

fn us_layout() -> Result<LayoutMap, LayoutError> {
    Ok([("keyg", "G"), ("slash", "/"), ("arrowup", "↑")]
        .into_iter()
        .collect())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let path = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../keymaps/default.keymap")
    });
    let keymap = keymap::load_keymap(&path)?;

    let mut registry = ActionRegistry::new();
    for b in &keymap.bindings {
        let name = b.action.to_string();
        registry.on_trigger(b.action.clone(), move || println!("  fired {}", name));
        let name = b.action.to_string();
        registry.on_release(b.action.clone(), move || println!("  released {}", name));
    }

    let mut engine = Engine::new(registry, NeutralTarget(BODY)).with_layout_source(us_layout);
    engine.set_bindings(&keymap.bindings);
    if let Some(layout) = engine.layout() {
        println!("Layout has {} labelled keys", layout.len());
    }

    let ctrl = Modifiers::ctrl();
    let none = Modifiers::none();
    let script = [
        ("ctrl+g on body", KeyEvent::down("g", ctrl), BODY),
        ("release g", KeyEvent::up("g", ctrl), BODY),
        ("ctrl+g in search box", KeyEvent::down("g", ctrl), SEARCH_BOX),
        ("hold m", KeyEvent::down("m", none), BODY),
        ("arrow up", KeyEvent::down("ArrowUp", none), BODY),
        ("release arrow up", KeyEvent::up("ArrowUp", none), BODY),
        ("release m", KeyEvent::up("m", none), BODY),
        ("alt+f", KeyEvent::down("f", Modifiers::alt()), BODY),
        ("release alt", KeyEvent::up("AltLeft", none), BODY),
    ];

    for (label, event, target) in &script {
        let res = engine.process_key(event, &mut HostState::focused(*target));
        println!("{:<24} -> {:?}", label, res);
    }

    let mut dialog = ConfirmDialog::new(Some("export".into()), || println!("  dialog closed"));
    let res = engine.process_key(
        &KeyEvent::down("Escape", none),
        &mut HostState::with_modal(BODY, &mut dialog),
    );
    println!("{:<24} -> {:?}", "escape with dialog", res);

    Ok(())
}
