use std::cell::RefCell;
use std::io::{Cursor, Read};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use time::macros::datetime;

use ui::core::platform::DeviceInfo;
use ui::core::timing::{Clock, ManualClock};
use ui::experiment::{
    experiment_order, ConditionVariant, ExperimentLog, ExperimentSession,
    IllustrationExperience, OrderPattern, ParticipantDevice, ParticipantInfo, SessionPhase,
    SurveyResponse, SURVEY_ITEM_COUNT,
};
use ui::export::{self, DownloadSink, ExportError};

/// Collects delivered archives instead of touching the filesystem.
#[derive(Default)]
struct CollectingSink {
    archives: RefCell<Vec<(String, Vec<u8>)>>,
}

impl DownloadSink for CollectingSink {
    async fn deliver(
        &self,
        file_name: &str,
        _mime: &str,
        bytes: Vec<u8>,
    ) -> Result<Option<String>, ExportError> {
        self.archives
            .borrow_mut()
            .push((file_name.to_string(), bytes));
        Ok(None)
    }
}

fn canvas_snapshot() -> String {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, 4, 4);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[200u8; 64]).unwrap();
    }
    format!("data:image/png;base64,{}", STANDARD.encode(buf))
}

fn participant() -> ParticipantInfo {
    ParticipantInfo {
        device_type: ParticipantDevice::Tablet,
        illustration_experience: IllustrationExperience::Occasional,
        input_device: "stylus".into(),
    }
}

fn read_entry(archive: &mut zip::ZipArchive<Cursor<Vec<u8>>>, name: &str) -> Vec<u8> {
    let mut file = archive.by_name(name).unwrap();
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).unwrap();
    bytes
}

#[test]
fn full_session_exports_log_and_single_snapshot() {
    let clock = ManualClock::starting_at(datetime!(2024-06-03 09:00 UTC));
    let mut session = ExperimentSession::with_clock(OrderPattern::One, clock.clone())
        .with_device_probe(DeviceInfo::default);

    let ids: Vec<String> = experiment_order(1).unwrap().iter().map(|p| p.id()).collect();
    assert_eq!(ids, ["UI1-TaskA", "UI1-TaskB", "UI2-TaskA", "UI2-TaskB"]);

    // Nothing is captured before the session starts.
    assert!(!session.recorder().color_pick("#000000", "wheel"));

    session.set_participant_id("U001").unwrap();
    session.start_full_experiment(OrderPattern::One, participant()).unwrap();
    assert_eq!(session.phase(), SessionPhase::TaskRunning { started_at: clock.now() });

    {
        let mut recorder = session.recorder();
        clock.advance_ms(1_000);
        assert!(recorder.color_pick("#ff8800", "base"));
        clock.advance_ms(1_000);
        assert!(recorder.apply_color("#ff8800", Some("sky")));
        clock.advance_ms(1_000);
        assert!(recorder.canvas_draw("brush", "#ff8800"));
    }
    clock.advance_ms(2_000);
    session.complete_current_condition(Some(canvas_snapshot())).unwrap();

    // Late callbacks between completion and advance are dropped.
    assert!(!session.recorder().canvas_undo());
    session.next_condition().unwrap();

    let first = &session.condition_logs()[0];
    assert_eq!(first.events.len(), 3);
    assert_eq!(first.pattern.id(), "UI1-TaskA");
    assert_eq!(first.task_duration_sec, Some(5.0));
    assert!(first
        .events
        .iter()
        .all(|e| e.time >= 0.0 && e.time <= 5.0));

    for _ in 0..3 {
        clock.advance_ms(30_000);
        session.complete_current_condition(None).unwrap();
        session.next_condition().unwrap();
    }
    assert_eq!(session.phase(), SessionPhase::AllPatternsComplete);
    assert_eq!(session.condition_logs().len(), 4);

    let log = session.experiment_log();
    let task_sum: f64 = log
        .conditions
        .iter()
        .filter_map(|c| c.task_duration_sec)
        .sum();
    assert_eq!(log.total_duration_sec, Some(95.0));
    assert_eq!(task_sum, 95.0);

    session.set_survey_response(SurveyResponse {
        ui1_ratings: [5; SURVEY_ITEM_COUNT],
        ui2_ratings: [2; SURVEY_ITEM_COUNT],
        favorite_ui: Some(ConditionVariant::Ui1),
        reason: "Suggestions were quicker".into(),
        suggestions: None,
    });

    let sink = CollectingSink::default();
    futures::executor::block_on(export::export_log(&session, &sink)).unwrap();
    futures::executor::block_on(export::export_log(&session, &sink)).unwrap();

    let archives = sink.archives.borrow();
    assert_eq!(archives.len(), 2);
    assert_eq!(archives[0].0, "experiment_U001.zip");

    let mut first_zip = zip::ZipArchive::new(Cursor::new(archives[0].1.clone())).unwrap();
    let mut second_zip = zip::ZipArchive::new(Cursor::new(archives[1].1.clone())).unwrap();
    let names: Vec<String> = first_zip.file_names().map(str::to_string).collect();
    assert_eq!(names.len(), 2);
    assert_eq!(names.iter().filter(|n| n.ends_with(".json")).count(), 1);
    assert_eq!(names.iter().filter(|n| n.ends_with(".png")).count(), 1);
    assert!(names.contains(&"UI1-TaskA_canvas.png".to_string()));

    let json_a = read_entry(&mut first_zip, "log_U001.json");
    let json_b = read_entry(&mut second_zip, "log_U001.json");
    assert_eq!(json_a, json_b);

    let exported: ExperimentLog = serde_json::from_slice(&json_a).unwrap();
    assert_eq!(exported, session.experiment_log());
    assert_eq!(exported.order_pattern, OrderPattern::One);
    assert_eq!(exported.first_ui, ConditionVariant::Ui1);
    assert_eq!(exported.survey_items.len(), SURVEY_ITEM_COUNT);

    let raw: serde_json::Value = serde_json::from_slice(&json_a).unwrap();
    assert!(raw["conditions"]
        .as_array()
        .unwrap()
        .iter()
        .all(|c| c.get("canvas_image").is_none()));
    assert_eq!(raw["conditions"][0]["events"][1]["type"], "apply_color");
    assert_eq!(raw["conditions"][0]["events"][1]["target"], "sky");
}

#[test]
fn pattern_two_runs_ui2_first() {
    let mut session = ExperimentSession::with_clock(OrderPattern::Two, ManualClock::default())
        .with_device_probe(DeviceInfo::default);
    session.start_full_experiment(OrderPattern::Two, participant()).unwrap();
    assert_eq!(session.current_condition(), ConditionVariant::Ui2);

    session.complete_current_condition(None).unwrap();
    session.next_condition().unwrap();
    session.complete_current_condition(None).unwrap();
    session.next_condition().unwrap();
    assert_eq!(session.current_pattern().id(), "UI1-TaskA");
}
