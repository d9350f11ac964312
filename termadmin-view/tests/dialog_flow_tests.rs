#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests driving the dialogs and the atom list the way a host page does.

use std::sync::Arc;

use termadmin_core::traits::{
    InMemoryMetadataService, InMemoryWorkflowService, MetadataService, WorkflowService,
};
use termadmin_core::types::{Component, MetadataKind, MetadataRecord, ProjectContext, WorkflowConfig};
use termadmin_view::presenter::{AtomsPresenter, CollapseGlyph};
use termadmin_view::workflow::{
    merge_record, ConfigEditor, SessionState, SubmitError, TermTypeEditor, WorkflowOutcome,
};
use termadmin_view::PresenterConfig;

fn project() -> ProjectContext {
    ProjectContext::new(5, "MTH", "2024AB")
}

#[tokio::test]
async fn config_page_adds_and_merges_result() {
    let service = Arc::new(InMemoryWorkflowService::new());
    service
        .add_workflow_config(5, &WorkflowConfig::with_type("MUTUALLY_EXCLUSIVE"))
        .await
        .unwrap();

    let mut page_list = service.find_workflow_configs(5).await.unwrap();
    let siblings: Arc<[WorkflowConfig]> = page_list.clone().into();

    // Duplicate caught locally.
    let mut editor = ConfigEditor::add(service.clone(), project(), siblings.clone());
    editor.config_mut().unwrap().config_type = "MUTUALLY_EXCLUSIVE".to_string();
    assert_eq!(editor.submit().await, Err(SubmitError::Invalid));
    assert_eq!(editor.errors().len(), 1);

    // Corrected and accepted.
    editor.config_mut().unwrap().config_type = "QUALITY_ASSURANCE".to_string();
    let saved = editor.submit().await.unwrap();
    assert!(editor.errors().is_empty());

    merge_record(&mut page_list, saved);
    assert_eq!(page_list.len(), 2);
    assert_eq!(service.find_workflow_configs(5).await.unwrap(), page_list);
}

#[tokio::test]
async fn config_edit_result_replaces_row() {
    let service = Arc::new(InMemoryWorkflowService::new());
    let stored = service
        .add_workflow_config(5, &WorkflowConfig::with_type("QA"))
        .await
        .unwrap();
    let mut page_list = vec![stored.clone()];

    let mut editor = ConfigEditor::edit(
        service.clone(),
        project(),
        page_list.clone().into(),
        &stored,
    );
    editor.config_mut().unwrap().query_style = Some("LUCENE".to_string());
    let saved = editor.submit().await.unwrap();
    merge_record(&mut page_list, saved);

    assert_eq!(page_list.len(), 1);
    assert_eq!(page_list[0].query_style.as_deref(), Some("LUCENE"));
    assert_eq!(
        service.get_workflow_config(5, stored.id.unwrap()).await.unwrap(),
        page_list[0]
    );
}

#[tokio::test]
async fn term_type_round_through_trait_object() {
    let service: Arc<dyn MetadataService> = Arc::new(InMemoryMetadataService::new());

    let mut add = TermTypeEditor::add(service.clone(), MetadataKind::TermType, project());
    let record = add.record_mut().unwrap();
    record.set_abbreviation("PN");
    record.set_expanded_form("Preferred name");
    let created = add.submit().await.unwrap();
    assert_eq!(created.terminology(), "MTH");
    assert_eq!(created.version(), "2024AB");

    let mut edit = TermTypeEditor::edit(service.clone(), &created, project());
    edit.load().await;
    assert_eq!(edit.record(), Some(&created));
    edit.record_mut()
        .unwrap()
        .set_expanded_form("Preferred name (MTH)");
    let outcome_record = edit.submit().await.unwrap();

    let MetadataRecord::TermType(updated) = outcome_record else {
        panic!("expected a term type");
    };
    assert_eq!(updated.expanded_form, "Preferred name (MTH)");
    assert_eq!(
        service
            .get_term_type("PN", "MTH", "2024AB")
            .await
            .unwrap()
            .expanded_form,
        "Preferred name (MTH)"
    );
}

#[tokio::test]
async fn dismissed_dialog_reports_cancel() {
    let service = Arc::new(InMemoryMetadataService::new());
    let mut editor = TermTypeEditor::add(service, MetadataKind::AttributeName, project());
    assert_eq!(editor.cancel(), WorkflowOutcome::Cancelled);
    assert_eq!(editor.state(), &SessionState::Dismissed);
    assert!(editor.record_mut().is_none());
}

#[test]
fn atom_list_from_service_payload() {
    let json = r#"{
        "id": 1,
        "name": "Heart",
        "terminology": "MTH",
        "version": "2024AB",
        "atoms": [
            {"id": 11, "name": "Heart", "termType": "PN", "hasContent": true},
            {"id": 12, "name": "Cardiac structure", "termType": "SY"},
            {"id": 13, "name": "Heart, NOS", "termType": "SY", "obsolete": true}
        ]
    }"#;
    let component: Component = serde_json::from_str(json).unwrap();

    let mut presenter = AtomsPresenter::new(&PresenterConfig::default());
    presenter.set_component(Some(component));
    assert_eq!(presenter.paged_data().len(), 2);

    let glyphs: Vec<CollapseGlyph> = presenter
        .paged_data()
        .iter()
        .map(AtomsPresenter::collapse_icon)
        .collect();
    assert_eq!(glyphs, vec![CollapseGlyph::Plus, CollapseGlyph::None]);

    presenter.toggle_item_collapse(11);
    assert_eq!(
        AtomsPresenter::collapse_icon(&presenter.paged_data()[0]),
        CollapseGlyph::Minus
    );

    presenter.set_show_hidden(true);
    assert_eq!(presenter.paged_data().len(), 3);
    assert!(presenter.paged_data()[0].expanded);
}
