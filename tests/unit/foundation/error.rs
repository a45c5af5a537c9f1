use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(
        ReelError::acquisition("x")
            .to_string()
            .contains("acquisition failure:")
    );
    assert!(
        ReelError::synthesis("x")
            .to_string()
            .contains("synthesis failure:")
    );
    assert!(
        ReelError::encoding("x")
            .to_string()
            .contains("encoding failure:")
    );
    assert!(ReelError::render("x").to_string().contains("render error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn synthesis_failure_converts_to_synthesis_variant() {
    let err: ReelError = SynthesisFailure::new("tts offline").into();
    assert!(matches!(err, ReelError::Synthesis(ref m) if m == "tts offline"));
}

#[test]
fn stages_form_a_single_linear_path() {
    let mut stage = Stage::Start;
    let mut visited = vec![stage];
    while let Some(next) = stage.next() {
        assert!(next > stage);
        visited.push(next);
        stage = next;
    }
    assert_eq!(visited.len(), 8);
    assert_eq!(stage, Stage::Done);
    assert_eq!(Stage::Failed.next(), None);
}

#[test]
fn pipeline_failure_names_stage_and_cause() {
    let failure = PipelineFailure::new(Stage::Encoded, ReelError::encoding("ffmpeg died"));
    let msg = failure.to_string();
    assert!(msg.contains("'encoded'"));
    assert!(msg.contains("ffmpeg died"));
    assert!(!failure.is_cancelled());
    assert!(PipelineFailure::new(Stage::Captioned, ReelError::Cancelled).is_cancelled());
}
