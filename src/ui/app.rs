use crate::editor::Editor;
use crate::model::WallId;
use crate::parser::BoxGroup;
use crate::sensor::MetricSource;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{DefaultTerminal, Frame};
use std::time::{Duration, Instant};

/// Explicit views cycled with `v`.
pub const VIEWS: [&str; 9] = [
    "front",
    "front left",
    "left",
    "back left",
    "back",
    "back right",
    "right",
    "front right",
    "top",
];

const INPUT_POLL: Duration = Duration::from_millis(250);

pub struct App {
    pub editor: Editor,
    pub sensors: Option<Box<dyn MetricSource>>,
    pub selected: Option<WallId>,
    pub view_index: Option<usize>,
    pub status: String,
    pub should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(editor: Editor) -> Self {
        Self {
            editor,
            sensors: None,
            selected: None,
            view_index: None,
            status: String::new(),
            should_quit: false,
        }
    }

    /// Polls live readings from `source` between key presses.
    #[must_use]
    pub fn with_sensors(mut self, source: Box<dyn MetricSource>) -> Self {
        self.sensors = Some(source);
        self
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            if let Some(source) = &self.sensors {
                self.editor.tick(Instant::now(), source.as_ref());
            }
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        super::dashboard::draw_dashboard(frame, self);
    }

    fn handle_events(&mut self) -> Result<()> {
        if !event::poll(INPUT_POLL)? {
            return Ok(());
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                self.handle_key(key.code);
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Left => self.editor.rotate_left(),
            KeyCode::Right => self.editor.rotate_right(),
            KeyCode::Up => self.editor.tilt_up(),
            KeyCode::Down => self.editor.tilt_down(),
            KeyCode::Char('f') => self.next_floor(),
            KeyCode::Char('l') => self.next_layer(),
            KeyCode::Char('v') => self.next_view(),
            KeyCode::Tab => self.select_next_wall(),
            KeyCode::Delete | KeyCode::Backspace => self.delete_selected(),
            KeyCode::Char('a') => self.add_item(),
            _ => {}
        }
        self.forget_hidden_selection();
    }

    fn next_floor(&mut self) {
        let mut options = vec![String::new()];
        options.extend(self.editor.floor_options());
        let next = next_option(&options, self.editor.scene().floor_name());
        self.editor.select_floor(&next);
    }

    fn next_layer(&mut self) {
        let mut options = vec![String::new()];
        options.extend(self.editor.layer_options());
        let next = next_option(&options, &self.editor.scene().state().layer);
        self.editor.set_layer(&next);
    }

    fn next_view(&mut self) {
        let index = self.view_index.map_or(0, |i| (i + 1) % VIEWS.len());
        self.view_index = Some(index);
        self.editor.set_view(VIEWS[index]);
    }

    fn select_next_wall(&mut self) {
        let visible: Vec<WallId> = self.editor.scene().visible_walls().map(|w| w.id).collect();
        if visible.is_empty() {
            self.selected = None;
            return;
        }
        let next = self
            .selected
            .and_then(|id| visible.iter().position(|v| *v == id))
            .map_or(0, |i| (i + 1) % visible.len());
        let id = visible[next];
        self.selected = Some(id);
        self.status = match self.editor.select(id) {
            Some(shape) => format!(
                "x {} y {} z {} | l {} d {} h {}",
                shape.x, shape.y, shape.z, shape.l, shape.d, shape.h
            ),
            None => String::new(),
        };
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.selected.take() else {
            return;
        };
        self.status = if self.editor.delete(id) {
            "Deleted".to_string()
        } else {
            String::new()
        };
    }

    fn add_item(&mut self) {
        self.selected = self.editor.add_shape(BoxGroup::Items);
        self.status = match self.selected {
            Some(_) => "Added item".to_string(),
            None => "Nothing to add to".to_string(),
        };
    }

    fn forget_hidden_selection(&mut self) {
        if let Some(id) = self.selected {
            if !self.editor.scene().is_visible(id) {
                self.selected = None;
            }
        }
    }
}

/// The option after `current`, wrapping around; the first one when
/// `current` is not listed.
fn next_option(options: &[String], current: &str) -> String {
    let next = options
        .iter()
        .position(|o| o == current)
        .map_or(0, |i| (i + 1) % options.len());
    options.get(next).cloned().unwrap_or_default()
}
