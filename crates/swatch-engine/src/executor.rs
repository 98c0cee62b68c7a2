use crate::command::{self, AxisRef, Command, CommandError};
use crate::formatter;
use crate::fragment::{FragmentError, FragmentSource};
use crate::session::VariantSession;
use swatch_common::formatter::format_table;
use swatch_core::api::OptionChange;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("Unknown axis: {0}")]
    UnknownAxis(String),
    #[error("No fragment source configured (pass --base-url or set fragments.base_url)")]
    NoFragmentSource,
    #[error(transparent)]
    Fragment(#[from] FragmentError),
}

#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub output: String,
}

impl ExecutionResult {
    fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
        }
    }
}

/// Runs text commands against a [`VariantSession`].
#[derive(Default)]
pub struct CommandExecutor {
    source: Option<Box<dyn FragmentSource>>,
}

impl CommandExecutor {
    pub fn new() -> Self {
        Self { source: None }
    }

    pub fn with_source(source: Box<dyn FragmentSource>) -> Self {
        Self {
            source: Some(source),
        }
    }

    fn resolve_axis(session: &VariantSession, axis: &AxisRef) -> Result<usize, ExecutorError> {
        let axes = session.resolver().axes();
        let found = match axis {
            AxisRef::Index(index) => axes.get(*index).map(|a| a.index),
            AxisRef::Name(name) => axes
                .iter()
                .find(|a| {
                    a.name
                        .as_deref()
                        .is_some_and(|n| n.eq_ignore_ascii_case(name))
                })
                .map(|a| a.index),
        };
        found.ok_or_else(|| {
            ExecutorError::UnknownAxis(match axis {
                AxisRef::Index(index) => index.to_string(),
                AxisRef::Name(name) => name.clone(),
            })
        })
    }

    pub async fn execute_line(
        &mut self,
        session: &mut VariantSession,
        line: &str,
    ) -> Result<ExecutionResult, ExecutorError> {
        let command = command::parse(line)?;
        self.execute(session, command).await
    }

    pub async fn execute(
        &mut self,
        session: &mut VariantSession,
        command: Command,
    ) -> Result<ExecutionResult, ExecutorError> {
        match command {
            Command::Select { axis, value } => {
                let axis = Self::resolve_axis(session, &axis)?;
                let change = session.apply(OptionChange::Select { axis, value });
                Ok(ExecutionResult::new(formatter::format_change(&change)))
            }
            Command::Clear { axis } => {
                let axis = Self::resolve_axis(session, &axis)?;
                let change = session.apply(OptionChange::Clear { axis });
                Ok(ExecutionResult::new(formatter::format_change(&change)))
            }
            Command::Set(values) => {
                let change = session.apply(OptionChange::Replace { values });
                Ok(ExecutionResult::new(formatter::format_change(&change)))
            }
            Command::Variant => Ok(ExecutionResult::new(formatter::format_variant_line(
                session.resolver(),
            ))),
            Command::Availability(axis) => {
                let resolver = session.resolver();
                let indices = match axis {
                    Some(axis) => vec![Self::resolve_axis(session, &axis)?],
                    None => (0..resolver.axis_count()).collect(),
                };
                let lines: Vec<String> = indices
                    .into_iter()
                    .map(|index| {
                        formatter::format_axis_availability(
                            &resolver.axes()[index],
                            &resolver.compute_axis_availability(index),
                        )
                    })
                    .collect();
                Ok(ExecutionResult::new(lines.join("\n")))
            }
            Command::Show => Ok(ExecutionResult::new(formatter::format_change(
                &session.plan(),
            ))),
            Command::Table => Ok(ExecutionResult::new(format_table(
                session.resolver().table(),
            ))),
            Command::Render => {
                if !session.config().fragments.enabled {
                    return Ok(ExecutionResult::new(
                        "Fragment rendering is disabled (fragments.enabled: false)",
                    ));
                }
                let source = self
                    .source
                    .as_deref()
                    .ok_or(ExecutorError::NoFragmentSource)?;
                let outcome = session.render(source).await?;
                Ok(ExecutionResult::new(formatter::format_outcome(
                    outcome.as_ref(),
                )))
            }
            Command::Help => Ok(ExecutionResult::new(command::HELP)),
        }
    }
}
