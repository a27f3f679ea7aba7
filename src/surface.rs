//! The editing surface
//!
//! An [`EditorSurface`] owns one text buffer together with its selection,
//! indentation engine and the derived side views (line gutter and cursor
//! status). Events are processed one at a time; each one finishes its full
//! re-derivation before the method returns.
//!
//! The surface is a plain state machine. It is a Bevy component so the plugin
//! can drive it, but nothing here needs an `App`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cursor_locator::{CursorReadout, CursorStatus};
use crate::gutter::LineGutter;
use crate::indent::{IndentDirection, IndentEngine, IndentUnit, OutdentPolicy};
use crate::input::{apply_input, CaretMotion, InputEdit};
use crate::settings::EditorSettings;
use crate::types::{SelectionRange, TextBuffer, TextEdit};

// ========== Configuration ==========

/// Construction-time options for one surface
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Spaces per indent level
    pub indent_width: usize,
    /// Name of the entity that shows the cursor readout
    pub cursor_status: Option<String>,
    /// Name of the entity the line markers are drawn into
    pub gutter: Option<String>,
    pub outdent_policy: OutdentPolicy,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            cursor_status: None,
            gutter: None,
            outdent_policy: OutdentPolicy::default(),
        }
    }
}

impl SurfaceConfig {
    /// Derive a config from the editor settings.
    ///
    /// `surface_name` is used to build the conventional gutter name
    /// `"{surface_name}-gutter-inner"` when the settings enable line numbers.
    pub fn from_settings(settings: &EditorSettings, surface_name: &str) -> Self {
        let gutter = settings
            .ui
            .show_line_numbers
            .then(|| settings.ui.gutter_name(surface_name));

        Self {
            indent_width: settings.indentation.indent_width,
            cursor_status: settings.ui.cursor_status.clone(),
            gutter,
            outdent_policy: settings.indentation.outdent_policy,
        }
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn with_cursor_status(mut self, name: impl Into<String>) -> Self {
        self.cursor_status = Some(name.into());
        self
    }

    pub fn with_gutter(mut self, name: impl Into<String>) -> Self {
        self.gutter = Some(name.into());
        self
    }

    pub fn with_outdent_policy(mut self, policy: OutdentPolicy) -> Self {
        self.outdent_policy = policy;
        self
    }
}

// ========== Key presses ==========

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        meta: false,
        alt: false,
    };

    /// Ctrl or Cmd
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Tab,
    Enter,
    Char(char),
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }
}

// ========== Commands ==========

/// Host controls a surface can activate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExternalControl {
    /// Submit the current content
    Save,
    /// Ask the host to reformat the content
    Format,
}

impl ExternalControl {
    pub fn name(&self) -> &'static str {
        match self {
            ExternalControl::Save => "playground-update",
            ExternalControl::Format => "playground-format",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceCommand {
    Indent,
    Outdent,
    Save,
    Format,
    Edit(InputEdit),
    Move(CaretMotion),
}

impl SurfaceCommand {
    /// Resolve a key press to one of the bound commands.
    ///
    /// Save and format win over Tab handling; any other key yields `None`.
    pub fn from_key(press: &KeyPress) -> Option<Self> {
        let mods = press.modifiers;
        match press.key {
            Key::Char(c) if mods.command() && c.eq_ignore_ascii_case(&'s') => Some(SurfaceCommand::Save),
            Key::Enter if mods.command() && mods.shift => Some(SurfaceCommand::Format),
            Key::Tab if mods.shift => Some(SurfaceCommand::Outdent),
            Key::Tab => Some(SurfaceCommand::Indent),
            _ => None,
        }
    }
}

// ========== Events ==========

/// Inbound events a surface subscribes to
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceEvent {
    KeyDown(KeyPress),
    Input(InputEdit),
    /// New vertical scroll offset of the surface
    Scroll(f32),
    Click(SelectionRange),
    KeyUp(SelectionRange),
    Select(SelectionRange),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceEventKind {
    KeyDown,
    Input,
    Scroll,
    Click,
    KeyUp,
    Select,
}

impl SurfaceEventKind {
    pub const ALL: [SurfaceEventKind; 6] = [
        SurfaceEventKind::KeyDown,
        SurfaceEventKind::Input,
        SurfaceEventKind::Scroll,
        SurfaceEventKind::Click,
        SurfaceEventKind::KeyUp,
        SurfaceEventKind::Select,
    ];
}

impl SurfaceEvent {
    pub fn kind(&self) -> SurfaceEventKind {
        match self {
            SurfaceEvent::KeyDown(_) => SurfaceEventKind::KeyDown,
            SurfaceEvent::Input(_) => SurfaceEventKind::Input,
            SurfaceEvent::Scroll(_) => SurfaceEventKind::Scroll,
            SurfaceEvent::Click(_) => SurfaceEventKind::Click,
            SurfaceEvent::KeyUp(_) => SurfaceEventKind::KeyUp,
            SurfaceEvent::Select(_) => SurfaceEventKind::Select,
        }
    }
}

/// Something the host has to act on after an event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceAction {
    ContentChanged(TextEdit),
    GutterRebuilt { line_count: usize },
    Activate(ExternalControl),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// The surface processed the event
    pub handled: bool,
    /// The host's default handling of the input must be suppressed
    pub prevent_default: bool,
    pub actions: Vec<SurfaceAction>,
}

impl EventOutcome {
    fn ignored() -> Self {
        Self::default()
    }

    fn handled() -> Self {
        Self {
            handled: true,
            ..Default::default()
        }
    }

    pub fn content_changed(&self) -> Option<TextEdit> {
        self.actions.iter().find_map(|action| match action {
            SurfaceAction::ContentChanged(edit) => Some(*edit),
            _ => None,
        })
    }

    pub fn activated(&self) -> Option<ExternalControl> {
        self.actions.iter().find_map(|action| match action {
            SurfaceAction::Activate(control) => Some(*control),
            _ => None,
        })
    }
}

// ========== Surface ==========

#[derive(Component, Clone, Debug)]
pub struct EditorSurface {
    buffer: TextBuffer,
    selection: SelectionRange,
    engine: IndentEngine,
    gutter: Option<LineGutter>,
    cursor_status: Option<CursorStatus>,
    scroll_top: f32,
    subscriptions: Vec<SurfaceEventKind>,
    attached: bool,
    /// Bumped on every content change
    version: u64,
}

impl EditorSurface {
    pub fn new(config: SurfaceConfig, initial_text: &str) -> Self {
        Self {
            buffer: TextBuffer::from(initial_text),
            selection: SelectionRange::caret(0),
            engine: IndentEngine::new(IndentUnit::new(config.indent_width), config.outdent_policy),
            gutter: config.gutter.map(|name| LineGutter::new(name)),
            cursor_status: config.cursor_status.map(|name| CursorStatus::new(name)),
            scroll_top: 0.0,
            subscriptions: Vec::new(),
            attached: false,
            version: 0,
        }
    }

    /// Subscribe to every inbound event kind and render the side views.
    ///
    /// Returns `false` if the surface was already attached.
    pub fn attach(&mut self) -> bool {
        if self.attached {
            return false;
        }
        self.subscriptions = SurfaceEventKind::ALL.to_vec();
        self.attached = true;
        self.refresh();
        true
    }

    /// Re-derive gutter, cursor readout and gutter scroll from current state.
    ///
    /// Returns `true` when the gutter markers were rebuilt.
    pub fn refresh(&mut self) -> bool {
        let rebuilt = self.render_gutter();
        self.render_cursor();
        self.sync_gutter_scroll();
        rebuilt
    }

    /// Release every subscription. Only the first call releases anything.
    pub fn detach(&mut self) -> bool {
        if !self.attached {
            return false;
        }
        self.subscriptions.clear();
        self.attached = false;
        true
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_subscribed(&self, kind: SurfaceEventKind) -> bool {
        self.subscriptions.contains(&kind)
    }

    /// Process one inbound event. Events arriving while detached are ignored.
    pub fn handle(&mut self, event: SurfaceEvent) -> EventOutcome {
        if !self.attached || !self.is_subscribed(event.kind()) {
            return EventOutcome::ignored();
        }

        match event {
            SurfaceEvent::KeyDown(press) => match SurfaceCommand::from_key(&press) {
                Some(command) => self.execute(command),
                None => EventOutcome::handled(),
            },
            SurfaceEvent::Input(input) => self.execute(SurfaceCommand::Edit(input)),
            SurfaceEvent::Scroll(top) => {
                self.scroll_top = top.max(0.0);
                self.sync_gutter_scroll();
                EventOutcome::handled()
            }
            SurfaceEvent::Click(selection) | SurfaceEvent::KeyUp(selection) | SurfaceEvent::Select(selection) => {
                self.selection = selection.clamp_to(self.buffer.len_chars());
                self.render_cursor();
                EventOutcome::handled()
            }
        }
    }

    pub fn execute(&mut self, command: SurfaceCommand) -> EventOutcome {
        match command {
            SurfaceCommand::Indent => self.reindent(IndentDirection::Indent),
            SurfaceCommand::Outdent => self.reindent(IndentDirection::Outdent),
            SurfaceCommand::Save => Self::activate(ExternalControl::Save),
            SurfaceCommand::Format => Self::activate(ExternalControl::Format),
            SurfaceCommand::Edit(input) => {
                let Some(applied) = apply_input(&mut self.buffer, self.selection, &input) else {
                    return EventOutcome::handled();
                };
                self.selection = applied.selection;
                self.content_changed(applied.edit, false)
            }
            SurfaceCommand::Move(motion) => {
                self.selection = motion.apply(&self.buffer, self.selection);
                self.render_cursor();
                EventOutcome::handled()
            }
        }
    }

    /// Replace the whole content from the host side, keeping the caret in range
    pub fn set_text(&mut self, text: &str) -> TextEdit {
        let edit = self.buffer.set_text(text);
        self.selection = self.selection.clamp_to(self.buffer.len_chars());
        self.version += 1;
        self.refresh();
        edit
    }

    fn reindent(&mut self, direction: IndentDirection) -> EventOutcome {
        let result = self.engine.apply(direction, &mut self.buffer, self.selection);
        self.selection = result.selection;
        // A zero-width unit still reports a change
        self.content_changed(result.edit, true)
    }

    fn activate(control: ExternalControl) -> EventOutcome {
        EventOutcome {
            handled: true,
            prevent_default: true,
            actions: vec![SurfaceAction::Activate(control)],
        }
    }

    fn content_changed(&mut self, edit: TextEdit, prevent_default: bool) -> EventOutcome {
        self.version += 1;

        let mut actions = vec![SurfaceAction::ContentChanged(edit)];
        if self.render_gutter() {
            if let Some(line_count) = self.gutter.as_ref().and_then(LineGutter::line_count) {
                actions.push(SurfaceAction::GutterRebuilt { line_count });
            }
        }
        self.render_cursor();
        self.sync_gutter_scroll();

        EventOutcome {
            handled: true,
            prevent_default,
            actions,
        }
    }

    fn render_gutter(&mut self) -> bool {
        match self.gutter.as_mut() {
            Some(gutter) => gutter.render(&self.buffer),
            None => false,
        }
    }

    fn render_cursor(&mut self) {
        if let Some(status) = self.cursor_status.as_mut() {
            status.render(&self.buffer, Some(self.selection.start()));
        }
    }

    fn sync_gutter_scroll(&mut self) {
        if let Some(gutter) = self.gutter.as_mut() {
            gutter.sync_scroll(self.scroll_top);
        }
    }

    // ========== Accessors ==========

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn selection(&self) -> SelectionRange {
        self.selection
    }

    pub fn indent_unit(&self) -> IndentUnit {
        self.engine.unit()
    }

    pub fn gutter(&self) -> Option<&LineGutter> {
        self.gutter.as_ref()
    }

    pub fn cursor_status(&self) -> Option<&CursorStatus> {
        self.cursor_status.as_ref()
    }

    /// Readout of the current caret, whether or not a status companion exists
    pub fn cursor(&self) -> CursorReadout {
        crate::cursor_locator::locate(&self.buffer, Some(self.selection.start()))
    }

    pub fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}
