use keyroute_core::keymap;
use keyroute_core::{
    ActionRegistry, ConfirmDialog, Engine, HostState, KeyAction, KeyEvent, Modifiers,
    NeutralTarget, RawBinding, TargetId,
};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

const BODY: TargetId = TargetId(100);
const TEXT_INPUT: TargetId = TargetId(200);

/// Engine whose registry appends every fired action name to a shared log.
fn recording_engine(bindings: &[RawBinding]) -> (Engine, Rc<RefCell<Vec<String>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut registry = ActionRegistry::new();
    for b in bindings {
        let l = log.clone();
        let name = b.action.to_string();
        registry.on_trigger(b.action.clone(), move || l.borrow_mut().push(name.clone()));
        let l = log.clone();
        let name = format!("release:{}", b.action);
        registry.on_release(b.action.clone(), move || l.borrow_mut().push(name.clone()));
    }
    let mut engine = Engine::new(registry, NeutralTarget(BODY));
    engine.set_bindings(bindings);
    (engine, log)
}

fn down(engine: &mut Engine, code: &str, mods: Modifiers) -> KeyAction {
    engine.process_key(&KeyEvent::down(code, mods), &mut HostState::focused(BODY))
}

fn up(engine: &mut Engine, code: &str, mods: Modifiers) -> KeyAction {
    engine.process_key(&KeyEvent::up(code, mods), &mut HostState::focused(BODY))
}

#[test]
fn ctrl_g_dispatches_once_on_neutral_focus_only() {
    let (mut engine, log) = recording_engine(&[RawBinding::new("ctrl+g", "gotoTime")]);

    assert_eq!(down(&mut engine, "g", Modifiers::ctrl()), KeyAction::Block);
    assert_eq!(*log.borrow(), vec!["gotoTime"]);
    up(&mut engine, "g", Modifiers::ctrl());

    log.borrow_mut().clear();
    let res = engine.process_key(
        &KeyEvent::down("g", Modifiers::ctrl()),
        &mut HostState::focused(TEXT_INPUT),
    );
    assert_eq!(res, KeyAction::Pass);
    assert!(log.borrow().is_empty());
}

#[test]
fn dialog_suppresses_other_actions_and_escape_closes_it() {
    let (mut engine, log) = recording_engine(&[RawBinding::new(
        "shift+slash",
        "openBindingsDialog",
    )]);
    let closed = Rc::new(Cell::new(0));
    let c = closed.clone();
    let mut dialog = ConfirmDialog::new(Some("export".into()), move || c.set(c.get() + 1));

    let res = engine.process_key(
        &KeyEvent::down("slash", Modifiers::shift()),
        &mut HostState::with_modal(BODY, &mut dialog),
    );
    assert_eq!(res, KeyAction::Pass);
    assert!(log.borrow().is_empty());

    let res = engine.process_key(
        &KeyEvent::down("Escape", Modifiers::none()),
        &mut HostState::with_modal(BODY, &mut dialog),
    );
    assert_eq!(res, KeyAction::Block);
    assert_eq!(closed.get(), 1);
}

#[test]
fn modifier_state_must_match_exactly() {
    let (mut engine, log) = recording_engine(&[
        RawBinding::new("a", "actionX"),
        RawBinding::new("shift+a", "actionY"),
    ]);
    down(&mut engine, "a", Modifiers::shift());
    assert_eq!(*log.borrow(), vec!["actionY"]);
}

#[test]
fn extra_key_must_be_held() {
    let (mut engine, log) = recording_engine(&[RawBinding::new("b+a", "chord")]);

    down(&mut engine, "b", Modifiers::none());
    assert_eq!(down(&mut engine, "a", Modifiers::none()), KeyAction::Block);
    up(&mut engine, "a", Modifiers::none());
    assert_eq!(*log.borrow(), vec!["chord", "release:chord"]);

    log.borrow_mut().clear();
    up(&mut engine, "b", Modifiers::none());
    assert_eq!(down(&mut engine, "a", Modifiers::none()), KeyAction::Pass);
    assert!(log.borrow().is_empty());
}

#[test]
fn alt_release_consumed_once_after_alt_chord() {
    let (mut engine, log) = recording_engine(&[RawBinding::new("alt+f", "openFileMenu")]);
    let alt = Modifiers::alt();

    down(&mut engine, "AltLeft", alt);
    assert_eq!(down(&mut engine, "f", alt), KeyAction::Block);
    up(&mut engine, "f", alt);
    assert_eq!(up(&mut engine, "AltLeft", Modifiers::none()), KeyAction::Block);
    assert_eq!(*log.borrow(), vec!["openFileMenu", "release:openFileMenu"]);

    down(&mut engine, "AltRight", alt);
    assert_eq!(up(&mut engine, "AltRight", Modifiers::none()), KeyAction::Pass);
}

#[test]
fn blur_clears_held_extra_keys() {
    let (mut engine, log) = recording_engine(&[RawBinding::new("b+a", "chord")]);
    down(&mut engine, "b", Modifiers::none());
    engine.on_window_blur();
    assert_eq!(down(&mut engine, "a", Modifiers::none()), KeyAction::Pass);
    assert!(log.borrow().is_empty());
}

#[test]
fn default_keymap_drives_the_engine() {
    let mut p = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("..");
    p.push("..");
    p.push("keymaps");
    p.push("default.keymap");

    let keymap = keymap::load_keymap(&p).expect("load default.keymap");
    assert_eq!(keymap.name.as_deref(), Some("Default player shortcuts"));

    let (mut engine, log) = recording_engine(&keymap.bindings);

    // Hold M, tap Up twice, release M, tap Up again
    down(&mut engine, "m", Modifiers::none());
    for _ in 0..2 {
        assert_eq!(down(&mut engine, "ArrowUp", Modifiers::none()), KeyAction::Block);
        up(&mut engine, "ArrowUp", Modifiers::none());
    }
    up(&mut engine, "m", Modifiers::none());
    assert_eq!(down(&mut engine, "ArrowUp", Modifiers::none()), KeyAction::Pass);
    up(&mut engine, "ArrowUp", Modifiers::none());

    down(&mut engine, "e", Modifiers { ctrl: true, shift: true, ..Modifiers::none() });
    down(&mut engine, "space", Modifiers::none());

    assert_eq!(
        *log.borrow(),
        vec![
            "volumeUp",
            "release:volumeUp",
            "volumeUp",
            "release:volumeUp",
            "export",
            "togglePlay",
        ]
    );
}
