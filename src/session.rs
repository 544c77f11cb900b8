use anyhow::Result;
use slotforge_container::{ActorId, Container, CursorClickHandler, TransferOutcome};
use slotforge_testkit::{EventRecord, JsonlSink};
use tracing::info;

use crate::command_script::{CommandScript, ScriptStep};

/// Result of one executed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub label: &'static str,
    pub slot: Option<usize>,
    pub outcome: String,
    pub changed_slots: usize,
}

/// Drives a container through a script as one actor.
pub struct Session {
    container: Container,
    handler: CursorClickHandler,
    actor: ActorId,
}

impl Session {
    pub fn new(container: Container, actor: ActorId) -> Self {
        Self {
            container,
            handler: CursorClickHandler::new(),
            actor,
        }
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Run every step, appending an event per step to `sink` when given.
    pub fn run(
        &mut self,
        script: &CommandScript,
        mut sink: Option<&mut JsonlSink>,
    ) -> Result<Vec<StepReport>> {
        script.validate(self.container.slot_count())?;
        if !self.container.can_interact(self.actor) {
            anyhow::bail!("actor {:?} may not use this container", self.actor);
        }

        let mut reports = Vec::with_capacity(script.steps().len());
        for (position, step) in script.steps().iter().enumerate() {
            let report = self.apply(step);
            info!(
                step = position,
                op = report.label,
                slot = ?report.slot,
                outcome = %report.outcome,
                changed = report.changed_slots,
                "applied script step"
            );
            if let Some(sink) = sink.as_deref_mut() {
                sink.write(&EventRecord {
                    step: position as u64,
                    kind: report.label,
                    slot: report.slot.unwrap_or_default(),
                    outcome: &report.outcome,
                    changed_slots: report.changed_slots,
                })?;
            }
            reports.push(report);
        }
        Ok(reports)
    }

    fn apply(&mut self, step: &ScriptStep) -> StepReport {
        let outcome = match *step {
            ScriptStep::Transfer { slot } => match self.container.quick_move(self.actor, slot) {
                TransferOutcome::Moved(stack) => format!("moved {}", stack.count),
                other => format!("{other:?}"),
            },
            ScriptStep::Click { slot, button, mode } => {
                let result =
                    self.container
                        .slot_click(slot, button, mode, self.actor, &mut self.handler);
                match result {
                    Some(stack) => format!("holding {}x{}", stack.count, stack.item_id().0),
                    None => "empty".to_string(),
                }
            }
            ScriptStep::RefreshCraft => {
                self.container.refresh_craft_results();
                "refreshed".to_string()
            }
        };
        let changes = self.container.take_changes();
        StepReport {
            label: step.label(),
            slot: step.slot(),
            outcome,
            changed_slots: changes.slots.len(),
        }
    }
}
