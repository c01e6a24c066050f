use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::Employee;

/// Single-line text buffer backing a modal prompt.
#[derive(Clone)]
pub(crate) struct PromptInput {
    pub(crate) label: String,
    pub(crate) value: String,
}

impl PromptInput {
    /// Build an input with its caption and prefilled default text. The
    /// default is editable like anything the user typed themselves.
    fn new(label: &str, default: &str) -> Self {
        Self {
            label: label.to_string(),
            value: default.to_string(),
        }
    }

    /// Append a character, rejecting control input.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value.push(ch);
        true
    }

    /// Remove the last character.
    pub(crate) fn backspace(&mut self) {
        self.value.pop();
    }

    /// Character count of the current value, for cursor positioning.
    pub(crate) fn value_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Trimmed value on submit, or `None` when only whitespace remains.
    /// Blank submission and cancellation are treated identically upstream.
    fn submitted(&self) -> Option<String> {
        let trimmed = self.value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Render the prompt body line for the modal overlay.
    pub(crate) fn build_line(&self) -> Line<'static> {
        let style = if self.value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Yellow)
        };
        Line::from(vec![
            Span::raw(format!("{} ", self.label)),
            Span::styled(self.value.clone(), style),
        ])
    }
}

/// The store mutation a completed prompt sequence asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EmployeeChange {
    Create { name: String, position: String },
    Update { id: i64, name: String, position: String },
}

/// Which command the flow was started for. Update carries the default the
/// second prompt still needs.
#[derive(Clone)]
enum FlowTarget {
    Create,
    Update { id: i64, position_default: String },
}

/// Which of the two prompts is currently on screen.
#[derive(Copy, Clone, PartialEq, Eq)]
enum PromptStep {
    Name,
    Position,
}

/// Two-step prompt sequence shared by the Add and Update commands: capture a
/// name, then a position, then commit. The flow is pure state with no widget
/// or connection handle in sight, so tests can script it by feeding values
/// straight into `input`.
#[derive(Clone)]
pub(crate) struct PromptFlow {
    target: FlowTarget,
    step: PromptStep,
    name: String,
    pub(crate) input: PromptInput,
}

/// What the flow wants to happen after a submission.
pub(crate) enum FlowStep {
    /// Another prompt remains; keep the overlay open with this state.
    Continue(PromptFlow),
    /// Blank input ends the whole command with no mutation.
    Abort,
    /// Both values captured; apply the change and refresh.
    Commit(EmployeeChange),
}

impl PromptFlow {
    /// Start the Add sequence with empty prompts.
    pub(crate) fn add() -> Self {
        Self {
            target: FlowTarget::Create,
            step: PromptStep::Name,
            name: String::new(),
            input: PromptInput::new("Enter employee name:", ""),
        }
    }

    /// Start the Update sequence with the selected record's current fields
    /// prefilled as defaults.
    pub(crate) fn update(employee: &Employee) -> Self {
        Self {
            target: FlowTarget::Update {
                id: employee.id,
                position_default: employee.position.clone(),
            },
            step: PromptStep::Name,
            name: String::new(),
            input: PromptInput::new("Enter the new name:", &employee.name),
        }
    }

    /// Overlay title for the current command.
    pub(crate) fn title(&self) -> &'static str {
        match self.target {
            FlowTarget::Create => "Add Employee",
            FlowTarget::Update { .. } => "Update Employee",
        }
    }

    /// Advance on Enter. Blank input aborts the command regardless of which
    /// step it occurs on.
    pub(crate) fn submit(self) -> FlowStep {
        let Some(value) = self.input.submitted() else {
            return FlowStep::Abort;
        };

        match self.step {
            PromptStep::Name => {
                let (label, default) = match &self.target {
                    FlowTarget::Create => ("Enter employee position:", String::new()),
                    FlowTarget::Update {
                        position_default, ..
                    } => ("Enter the new position:", position_default.clone()),
                };
                FlowStep::Continue(Self {
                    target: self.target,
                    step: PromptStep::Position,
                    name: value,
                    input: PromptInput::new(label, &default),
                })
            }
            PromptStep::Position => FlowStep::Commit(match self.target {
                FlowTarget::Create => EmployeeChange::Create {
                    name: self.name,
                    position: value,
                },
                FlowTarget::Update { id, .. } => EmployeeChange::Update {
                    id,
                    name: self.name,
                    position: value,
                },
            }),
        }
    }
}
