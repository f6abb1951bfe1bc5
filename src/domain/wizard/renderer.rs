use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use crate::domain::models::event::{DraftField, EventDraft};
use crate::domain::services::submission_gate::REQUIREMENTS;
use crate::domain::wizard::editors::{
    AudienceEditor, BasicDetailsEditor, DateTimeEditor, LocationEditor, MediaEditor,
};
use crate::domain::wizard::steps::WizardStep;

/// The field-group editor currently on screen. Exactly one is mounted at a
/// time; switching steps drops the old one together with its local state.
#[derive(Debug)]
pub enum MountedEditor {
    BasicDetails(BasicDetailsEditor),
    DateTime(DateTimeEditor),
    Location(LocationEditor),
    Media(MediaEditor),
    Audience(AudienceEditor),
}

impl MountedEditor {
    pub fn mount(step: WizardStep) -> Self {
        match step {
            WizardStep::BasicDetails => Self::BasicDetails(BasicDetailsEditor::default()),
            WizardStep::DateTime => Self::DateTime(DateTimeEditor::default()),
            WizardStep::Location => Self::Location(LocationEditor::default()),
            WizardStep::Media => Self::Media(MediaEditor::new()),
            WizardStep::Audience => Self::Audience(AudienceEditor::default()),
        }
    }

    pub fn step(&self) -> WizardStep {
        match self {
            Self::BasicDetails(_) => WizardStep::BasicDetails,
            Self::DateTime(_) => WizardStep::DateTime,
            Self::Location(_) => WizardStep::Location,
            Self::Media(_) => WizardStep::Media,
            Self::Audience(_) => WizardStep::Audience,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub field: DraftField,
    pub value: Value,
    pub required: bool,
    pub present: bool,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepView {
    pub step: WizardStep,
    pub index: usize,
    pub title: &'static str,
    pub description: &'static str,
    pub is_first: bool,
    pub is_last: bool,
    pub fields: Vec<FieldView>,
}

pub struct StepRenderer {
    mounted: MountedEditor,
}

impl Default for StepRenderer {
    fn default() -> Self {
        Self::new(WizardStep::default())
    }
}

impl StepRenderer {
    pub fn new(step: WizardStep) -> Self {
        Self { mounted: MountedEditor::mount(step) }
    }

    pub fn step(&self) -> WizardStep {
        self.mounted.step()
    }

    /// Remounts the editor if `step` differs from the one on screen.
    pub fn show(&mut self, step: WizardStep) {
        if self.mounted.step() != step {
            debug!("Mounting editor for step {:?}", step);
            self.mounted = MountedEditor::mount(step);
        }
    }

    pub fn editor_mut(&mut self) -> &mut MountedEditor {
        &mut self.mounted
    }

    pub fn editor(&self) -> &MountedEditor {
        &self.mounted
    }

    pub fn view(&self, draft: &EventDraft) -> StepView {
        render_step(self.step(), draft)
    }
}

/// Field values of `step` as shown by its editor, with the requirement flags
/// the submission gate would apply right now.
pub fn render_step(step: WizardStep, draft: &EventDraft) -> StepView {
    let values = serde_json::to_value(draft).unwrap_or(Value::Null);

    let fields = step
        .fields()
        .iter()
        .map(|&field| FieldView {
            field,
            value: values.get(field.as_str()).cloned().unwrap_or(Value::Null),
            required: REQUIREMENTS
                .iter()
                .any(|rule| rule.field == field && (rule.applies)(draft)),
            present: draft.is_present(field),
        })
        .collect();

    StepView {
        step,
        index: step.index(),
        title: step.title(),
        description: step.description(),
        is_first: step.is_first(),
        is_last: step.is_last(),
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::event::EventType;

    #[test]
    fn test_location_view_follows_event_type() {
        let mut draft = EventDraft { venue: "Hall A".into(), ..Default::default() };
        let view = render_step(WizardStep::Location, &draft);
        let venue = view.fields.iter().find(|f| f.field == DraftField::Venue).unwrap();
        let link = view.fields.iter().find(|f| f.field == DraftField::VirtualLink).unwrap();
        assert!(venue.required && venue.present);
        assert_eq!(venue.value, Value::String("Hall A".into()));
        assert!(!link.required);

        draft.event_type = EventType::Virtual;
        let view = render_step(WizardStep::Location, &draft);
        let link = view.fields.iter().find(|f| f.field == DraftField::VirtualLink).unwrap();
        assert!(link.required && !link.present);
    }

    #[test]
    fn test_show_remounts_only_on_change() {
        let mut renderer = StepRenderer::default();
        if let MountedEditor::BasicDetails(editor) = renderer.editor_mut() {
            editor.set_category_query("tech");
        }
        renderer.show(WizardStep::BasicDetails);
        match renderer.editor() {
            MountedEditor::BasicDetails(editor) => assert_eq!(editor.category_query(), "tech"),
            other => panic!("unexpected editor {:?}", other.step()),
        }

        renderer.show(WizardStep::Media);
        renderer.show(WizardStep::BasicDetails);
        match renderer.editor() {
            MountedEditor::BasicDetails(editor) => assert_eq!(editor.category_query(), ""),
            other => panic!("unexpected editor {:?}", other.step()),
        }
    }

    #[test]
    fn test_leaving_media_step_cancels_reads() {
        let mut renderer = StepRenderer::new(WizardStep::Media);
        let token = match renderer.editor() {
            MountedEditor::Media(editor) => editor.cancellation(),
            other => panic!("unexpected editor {:?}", other.step()),
        };
        assert!(!token.is_cancelled());
        renderer.show(WizardStep::Audience);
        assert!(token.is_cancelled());
    }
}
