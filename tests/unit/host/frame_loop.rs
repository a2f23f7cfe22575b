use super::*;
use crate::assets::sprite::SpriteSource;
use crate::config::PatchConfig;
use crate::host::sink::InMemorySink;
use crate::render::backend::FrameRGBA;
use crate::render::plan::Scene;

#[derive(Default)]
struct CountingBackend {
    calls: u64,
}

impl RenderBackend for CountingBackend {
    fn render_scene(
        &mut self,
        scene: &Scene,
        _sprites: &dyn SpriteSource,
    ) -> PatchResult<FrameRGBA> {
        self.calls += 1;
        Ok(FrameRGBA {
            width: scene.canvas.width,
            height: scene.canvas.height,
            data: Vec::new(),
            premultiplied: true,
        })
    }
}

fn patch(total: u64) -> VegPatch {
    let cfg = PatchConfig {
        initial_total: total,
        goal: 1_000,
        ..PatchConfig::default()
    };
    VegPatch::new(&cfg).unwrap()
}

#[test]
fn script_lines_are_sorted_and_validated() {
    let text = r#"
{"frame": 9, "message": {"type": "REQUEST_UPDATE"}}
{"frame": 2, "message": {"type": "PLEDGE_SUBMITTED", "tokens": 4}}
"#;
    let mut script = EventScript::from_reader(text.as_bytes()).unwrap();
    assert_eq!(script.len(), 2);
    assert!(script.take_due(1).is_empty());
    assert_eq!(script.take_due(5).len(), 1);
    assert_eq!(script.take_due(100), vec![WidgetMessage::RequestUpdate]);
    assert!(script.is_empty());

    let bad = r#"{"frame": 0, "message": {"type": "PLEDGE_SUBMITTED", "tokens": 0}}"#;
    let err = EventScript::from_reader(bad.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("line 1"), "{err}");
}

#[test]
fn scripted_pledge_is_planted_and_painted() {
    let mut p = patch(100);
    let mut sync = SyncLayer::new(100);
    let mut script = EventScript::from_reader(
        r#"{"frame": 0, "message": {"type": "PLEDGE_SUBMITTED", "tokens": 25}}
{"frame": 1, "message": {"type": "REQUEST_UPDATE"}}"#
            .as_bytes(),
    )
    .unwrap();
    let mut backend = CountingBackend::default();
    let mut sink = InMemorySink::default();

    let report = FrameLoop::new(FrameLoopOpts {
        max_frames: 2_000,
        ..FrameLoopOpts::default()
    })
    .run(&mut p, &mut sync, &mut script, None, &mut backend, &mut sink)
    .unwrap();

    assert_eq!(report.committed_tokens, 25);
    assert_eq!(p.progress().total(), 125);
    assert!(p.is_settled());
    assert!(report.frames < 2_000);
    assert_eq!(report.painted, backend.calls);
    assert_eq!(sink.frames.len() as u64, report.painted);
    assert_eq!(sink.frames[0].0, FrameIndex(0));
    assert_eq!(
        report.replies,
        vec![WidgetMessage::PatchUpdate {
            total: 125,
            goal: 1_000,
            submissions: Some(0)
        }]
    );
}

#[test]
fn settled_engine_paints_one_frame_and_stops() {
    let mut p = patch(0);
    let mut sync = SyncLayer::new(0);
    let mut backend = CountingBackend::default();
    let mut sink = InMemorySink::default();
    let report = FrameLoop::default()
        .run(
            &mut p,
            &mut sync,
            &mut EventScript::default(),
            None,
            &mut backend,
            &mut sink,
        )
        .unwrap();
    assert_eq!(report.frames, 1);
    assert_eq!(report.painted, 1);
}
