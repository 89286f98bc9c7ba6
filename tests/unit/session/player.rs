use super::*;
use crate::config::opts::ExportOpts;
use crate::encode::sink::InMemoryCapture;
use crate::export::job::{ExportProgress, ExportState};
use crate::layout::measure::FixedAdvanceMeasure;
use crate::playback::clock::ManualClock;
use crate::playback::scheduler::ManualScheduler;
use crate::render::recording::RecordingSurface;

struct NullStage;

impl Stage for NullStage {
    fn apply(&mut self, _state: &VisualState) {}
}

struct NoPause;

impl Yielder for NoPause {
    fn yield_now(&mut self, _progress: ExportProgress) {}
}

const BODY: &str = "The dragon woke.\nIt was hungry.\nIt flew away.";

fn session(script: StoryScript) -> (StorySession<ManualClock, ManualScheduler>, ManualClock, ManualScheduler) {
    let clock = ManualClock::new();
    let sched = ManualScheduler::new();
    let s = StorySession::new(
        script,
        RenderProfile::default(),
        Box::new(FixedAdvanceMeasure::default()),
        clock.clone(),
        sched.clone(),
    )
    .unwrap();
    (s, clock, sched)
}

#[test]
fn untitled_story_cannot_play_or_export() {
    let (mut s, _, sched) = session(StoryScript::from_text(BODY));
    assert!(s.timeline().is_none());
    assert!(!s.can_play());
    assert!(!s.can_export());
    assert!(!s.play());
    assert_eq!(sched.requested(), 0);
}

#[test]
fn title_arrival_enables_playback() {
    let (mut s, _, _) = session(StoryScript::from_text(BODY));
    s.set_script(StoryScript::from_text(BODY).with_title("A Dragon's Tale"))
        .unwrap();
    assert!(s.can_play());
    assert!(s.can_export());
    assert!((s.timeline().unwrap().total_duration - 52.16).abs() < 1e-9);
}

#[test]
fn speed_change_recomputes_timeline() {
    let (mut s, _, _) = session(StoryScript::from_text(BODY).with_title("T"));
    let medium = s.timeline().unwrap().total_duration;
    s.set_speed(Speed::Fast).unwrap();
    let fast = s.timeline().unwrap().total_duration;
    s.set_speed(Speed::Slow).unwrap();
    let slow = s.timeline().unwrap().total_duration;
    assert!(fast < medium && medium < slow);
}

#[test]
fn viewport_drives_preview_container_height() {
    let (mut s, _, _) = session(StoryScript::from_text(BODY).with_title("T"));
    s.set_viewport(Canvas {
        width: 800,
        height: 600,
    })
    .unwrap();
    assert_eq!(s.timeline().unwrap().container_height, 600.0);
    assert!(
        s.set_viewport(Canvas {
            width: 0,
            height: 600,
        })
        .is_err()
    );
}

#[test]
fn playback_runs_through_the_session() {
    let (mut s, clock, sched) = session(StoryScript::from_text(BODY).with_title("T"));
    let mut stage = NullStage;
    assert!(s.play());
    clock.advance(20.6);
    let v = s.tick(sched.fire_next().unwrap(), &mut stage).unwrap();
    assert!((v.body_offset_y - 500.0).abs() < 1e-6);
    assert_eq!(s.visible_lines(), 0..3);
    assert_eq!(s.clock_label(), "0:20 / 0:53");

    s.close();
    assert!(!s.playback().is_playing);
    assert_eq!(sched.pending_len(), 0);
}

#[test]
fn export_pauses_playback_and_produces_artifact() {
    let (mut s, _, _) = session(StoryScript::from_text(BODY).with_title("A Dragon's Tale!"));
    s.play();
    let mut pipeline = ExportPipeline::new(
        RecordingSurface::new(s.profile().canvas()),
        InMemoryCapture::new(),
        ExportOpts::default(),
    );
    let artifact = s.export(&mut pipeline, &mut NoPause).unwrap();
    assert!(!s.playback().is_playing);
    assert_eq!(artifact.file_name, "a_dragons_tale_story_16x9.mp4");
    assert_eq!(pipeline.state(), ExportState::Complete);
}

#[test]
fn export_before_title_is_rejected() {
    let (mut s, _, _) = session(StoryScript::from_text(BODY));
    let mut pipeline = ExportPipeline::new(
        RecordingSurface::new(s.profile().canvas()),
        InMemoryCapture::new(),
        ExportOpts::default(),
    );
    let err = s.export(&mut pipeline, &mut NoPause).unwrap_err();
    assert!(matches!(err, StoryError::NotReady(_)));
    assert_eq!(pipeline.state(), ExportState::Idle);
    assert!(pipeline.job().is_none());
}

#[test]
fn export_wraps_lines_with_the_preview_measure() {
    let prose = vec!["ill fill mill till will ".repeat(20); 10].join("\n");
    let script = StoryScript::from_text(&prose).with_title("Mills");
    let mut s = StorySession::new(
        script.clone(),
        RenderProfile::default(),
        Box::new(FixedAdvanceMeasure { em_ratio: 1.0 }),
        ManualClock::new(),
        ManualScheduler::new(),
    )
    .unwrap();
    let fps = ExportOpts::default().fps;
    let preview = *s.timeline().unwrap();

    // The surface measures at half the preview's advance.
    let mut surface_only = ExportPipeline::new(
        RecordingSurface::new(s.profile().canvas()),
        InMemoryCapture::new(),
        ExportOpts::default(),
    );
    surface_only
        .run(&script, s.profile(), &mut NoPause)
        .unwrap();
    assert!(surface_only.timeline().unwrap().total_duration < preview.total_duration);

    let mut pipeline = ExportPipeline::new(
        RecordingSurface::new(s.profile().canvas()),
        InMemoryCapture::new(),
        ExportOpts::default(),
    );
    s.export(&mut pipeline, &mut NoPause).unwrap();
    assert_eq!(pipeline.timeline(), Some(&preview));
    assert_eq!(
        pipeline.capture().indices().len() as u64,
        preview.frame_count(fps)
    );
}
