use fusion_engine::{
    AudioCues, CueKind, EngineContext, FusionError, Game, InputEvent, InputQueue, RoundStore,
    UiCommand,
};

use crate::config::FusionConfig;
use crate::sequencer::{Phase, Sequencer};

/// Fusion Reveal: scan a mosaic of faces, guess the pair behind the fused
/// image, then split it to reveal both identities.
pub struct FusionReveal {
    sequencer: Sequencer,
}

impl FusionReveal {
    pub fn new() -> Self {
        Self {
            sequencer: Sequencer::new(FusionConfig::default()),
        }
    }

    pub fn phase(&self) -> Phase {
        self.sequencer.phase()
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }
}

impl Default for FusionReveal {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for FusionReveal {
    fn init(&mut self, ctx: &mut EngineContext) {
        self.sequencer.init(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::Hover => ctx.audio.play_cue(CueKind::Hover),
                InputEvent::Action(action) => {
                    // browsers keep audio suspended until a gesture
                    if ctx.audio.unlock() {
                        ctx.emit_ui(UiCommand::ResumeAudio);
                    }
                    ctx.audio.play_cue(CueKind::Click);
                    self.sequencer.handle(action, ctx);
                }
            }
        }

        self.sequencer.tick(ctx);
    }

    fn load_rounds(&mut self, rounds: RoundStore) {
        if rounds.is_empty() {
            log::warn!("round data is empty, fallbacks will be shown");
        }
        self.sequencer.set_rounds(rounds);
    }

    fn load_config(&mut self, json: &str) -> Result<(), FusionError> {
        let config = FusionConfig::from_json(json)?;
        self.sequencer.set_config(config);
        Ok(())
    }

    fn status(&self) -> u32 {
        self.phase().as_u32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fusion_engine::{
        rgba_from_raw, Action, Element, ImageRequest, ImageResult, RoundRecord, Screen, SoundEvent,
        UiClass, MAX_SURFACE_DIMENSION,
    };

    const DT: f32 = 1.0 / 60.0;

    struct Harness {
        game: FusionReveal,
        ctx: EngineContext,
        ui: Vec<UiCommand>,
        sounds: Vec<SoundEvent>,
    }

    impl Harness {
        fn new(rounds: Vec<RoundRecord>) -> Self {
            let mut game = FusionReveal::new();
            game.load_rounds(RoundStore::new(rounds));
            let mut ctx = EngineContext::new();
            game.init(&mut ctx);
            let ui = ctx.drain_ui();
            Self {
                game,
                ctx,
                ui,
                sounds: Vec::new(),
            }
        }

        fn step(&mut self, input: &InputQueue) {
            self.ctx.clear_frame_data();
            self.game.update(&mut self.ctx, input);
            self.ctx.tick_systems();
            self.sounds.extend_from_slice(self.ctx.audio.sounds());
            self.ui.extend(self.ctx.drain_ui());
        }

        fn press(&mut self, action: Action) {
            let mut input = InputQueue::new();
            input.push(InputEvent::Action(action));
            self.step(&input);
        }

        fn run(&mut self, seconds: f32) {
            let empty = InputQueue::new();
            for _ in 0..(seconds / DT).round() as usize {
                self.step(&empty);
            }
        }

        fn take_ui(&mut self) -> Vec<UiCommand> {
            std::mem::take(&mut self.ui)
        }

        fn take_sounds(&mut self) -> Vec<CueKind> {
            std::mem::take(&mut self.sounds)
                .into_iter()
                .filter_map(|s| s.kind())
                .collect()
        }

        /// Answer the most recent image load.
        fn answer(&mut self, result: ImageResult) -> String {
            let (request, src) = self
                .ui
                .iter()
                .rev()
                .find_map(|c| match c {
                    UiCommand::LoadImage { request, src } => Some((*request, src.clone())),
                    _ => None,
                })
                .expect("no image load was requested");
            assert!(self.ctx.images.deliver(ImageRequest(request), result));
            src
        }

        fn play_to_merge_ready(&mut self, image: ImageResult) {
            self.press(Action::Start);
            self.run(4.0);
            self.run(5.0);
            self.answer(image);
            self.run(DT);
            assert!(self.game.sequencer().merge_ready());
        }

        fn assert_one_screen(&self) {
            let active = self.game.sequencer().screens().states().iter().filter(|(_, on)| *on).count();
            assert_eq!(active, 1);
        }
    }

    fn texts(ui: &[UiCommand], element: Element) -> Vec<String> {
        ui.iter()
            .filter_map(|c| match c {
                UiCommand::SetText { element: e, text } if *e == element => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn images(ui: &[UiCommand], element: Element) -> Vec<String> {
        ui.iter()
            .filter_map(|c| match c {
                UiCommand::SetImage { element: e, src } if *e == element => Some(src.clone()),
                _ => None,
            })
            .collect()
    }

    fn screens_shown(ui: &[UiCommand]) -> Vec<Screen> {
        ui.iter()
            .filter_map(|c| match c {
                UiCommand::ShowScreen { screen } => Some(*screen),
                _ => None,
            })
            .collect()
    }

    fn round(merged: &str, left: &str, right: &str, left_text: &str, right_text: &str) -> RoundRecord {
        RoundRecord {
            merged_image: Some(merged.to_string()),
            left_image: Some(left.to_string()),
            right_image: Some(right.to_string()),
            left_text: Some(left_text.to_string()),
            right_text: Some(right_text.to_string()),
        }
    }

    fn pixels(width: u32, height: u32) -> ImageResult {
        let image = rgba_from_raw(width, height, vec![200; (width * height * 4) as usize]).unwrap();
        ImageResult::Loaded(image)
    }

    #[test]
    fn init_shows_intro_with_shards() {
        let h = Harness::new(Vec::new());
        assert_eq!(h.game.phase(), Phase::Intro);
        assert_eq!(screens_shown(&h.ui), vec![Screen::Intro]);
        let shards = h.ui.iter().find_map(|c| match c {
            UiCommand::SpawnShards { shards } => Some(shards.len()),
            _ => None,
        });
        assert_eq!(shards, Some(15));
        h.assert_one_screen();
    }

    #[test]
    fn full_round_with_data() {
        let mut h = Harness::new(vec![round("a.jpg", "l.jpg", "r.jpg", "X", "Y")]);
        h.take_ui();

        h.press(Action::Start);
        assert_eq!(h.game.phase(), Phase::Selection);
        assert_eq!(h.game.status(), 1);
        let ui = h.take_ui();
        assert_eq!(screens_shown(&ui), vec![Screen::Selection]);
        assert!(ui.iter().any(|c| matches!(c, UiCommand::FillMosaic { cells } if cells.len() == 150)));
        assert!(ui.iter().any(|c| matches!(c, UiCommand::Speak { .. })));
        assert!(h.take_sounds().contains(&CueKind::Transition));
        h.assert_one_screen();

        h.run(3.9);
        assert_eq!(h.game.phase(), Phase::Selection);
        h.run(0.2);
        assert_eq!(h.game.phase(), Phase::Merge);
        let ui = h.take_ui();
        assert_eq!(texts(&ui, Element::ClueText), vec!["X X Y"]);
        assert!(ui.contains(&UiCommand::add_class(Element::SphereWrapper, UiClass::FadedOut)));
        h.assert_one_screen();

        // no image is requested while the clue is up
        h.run(4.8);
        assert!(!h.take_ui().iter().any(|c| matches!(c, UiCommand::LoadImage { .. })));
        h.run(0.3);
        assert_eq!(h.answer(pixels(4, 2)), "a.jpg");
        h.take_ui();
        h.run(DT);

        let ui = h.take_ui();
        assert!(ui.contains(&UiCommand::ResizeSurface { width: 1200, height: 600 }));
        assert!(ui.contains(&UiCommand::set_style(Element::EnergySphere, "aspect-ratio", "2")));
        let url = ui.iter().find_map(|c| match c {
            UiCommand::PresentSurface { data_url } => Some(data_url.clone()),
            _ => None,
        });
        let url = url.expect("surface was not presented");
        assert!(url.starts_with("data:image/png;base64,"));
        assert!(ui.contains(&UiCommand::set_style(
            Element::SplitLeft,
            "background-image",
            format!("url({})", url)
        )));
        assert_eq!(images(&ui, Element::RevealMerged), vec!["a.jpg"]);
        assert_eq!(images(&ui, Element::RevealImageLeft), vec!["l.jpg"]);
        assert_eq!(images(&ui, Element::RevealImageRight), vec!["r.jpg"]);
        assert_eq!(texts(&ui, Element::RevealNameLeft), vec!["X"]);
        assert_eq!(texts(&ui, Element::RevealNameRight), vec!["Y"]);
        assert_eq!(texts(&ui, Element::RevealCenterName), vec!["FUSION COMPLETE"]);
        assert_eq!(h.game.sequencer().surface().width(), 1200);

        h.take_sounds();
        h.press(Action::Split);
        assert_eq!(h.game.phase(), Phase::Merge);
        assert!(h.take_sounds().contains(&CueKind::EnergyBuildup));
        assert!(h.take_ui().contains(&UiCommand::add_class(Element::EnergySphere, UiClass::Infusing)));

        h.run(3.4);
        assert_eq!(h.game.phase(), Phase::Merge);
        h.run(0.2);
        assert_eq!(h.game.phase(), Phase::Reveal);
        let ui = h.take_ui();
        assert_eq!(screens_shown(&ui), vec![Screen::Reveal]);
        assert!(ui.contains(&UiCommand::remove_class(Element::EnergySphere, UiClass::Infusing)));
        assert!(h.game.sequencer().screens().is_active(Screen::Reveal));
        h.assert_one_screen();
    }

    #[test]
    fn empty_round_data_uses_fallbacks() {
        let mut h = Harness::new(Vec::new());
        h.press(Action::Start);
        h.run(4.1);
        assert_eq!(texts(&h.ui, Element::ClueText), vec!["HR X AI"]);
        h.run(5.0);
        assert_eq!(h.answer(pixels(2, 2)), "assets/preview-merged.jpg");
        h.take_ui();
        h.run(DT);

        let ui = h.take_ui();
        assert_eq!(images(&ui, Element::RevealImageLeft), vec!["assets/img001.jpg"]);
        assert_eq!(images(&ui, Element::RevealImageRight), vec!["assets/img002.jpg"]);
        assert_eq!(texts(&ui, Element::RevealNameLeft), vec!["HR"]);
        assert_eq!(texts(&ui, Element::RevealNameRight), vec!["AI"]);
        assert!(texts(&ui, Element::RevealCenterName).is_empty());
    }

    #[test]
    fn partial_record_mixes_data_and_fallbacks() {
        let record = RoundRecord {
            merged_image: Some("m.jpg".to_string()),
            right_text: Some("Y".to_string()),
            ..RoundRecord::default()
        };
        let mut h = Harness::new(vec![record]);
        h.press(Action::Start);
        h.run(4.1);
        assert_eq!(texts(&h.ui, Element::ClueText), vec!["HR X Y"]);
    }

    #[test]
    fn failed_image_still_completes_merge() {
        let mut h = Harness::new(vec![round("missing.jpg", "l.jpg", "r.jpg", "X", "Y")]);
        h.play_to_merge_ready(ImageResult::Failed);
        let ui = h.take_ui();
        assert!(ui.contains(&UiCommand::ResizeSurface { width: 0, height: 600 }));
        assert!(ui.iter().any(|c| matches!(c, UiCommand::PresentSurface { .. })));
        assert_eq!(texts(&ui, Element::RevealNameLeft), vec!["X"]);

        h.press(Action::Split);
        h.run(3.5);
        assert_eq!(h.game.phase(), Phase::Reveal);
    }

    #[test]
    fn split_waits_for_the_composite() {
        let mut h = Harness::new(Vec::new());
        h.press(Action::Start);
        h.run(4.0);
        h.press(Action::Split);
        h.run(10.0);
        // still waiting on the host for pixels
        assert_eq!(h.game.phase(), Phase::Merge);
        assert!(!h.game.sequencer().merge_ready());
        assert!(!h.take_sounds().contains(&CueKind::EnergyBuildup));
    }

    #[test]
    fn split_during_infusion_is_ignored() {
        let mut h = Harness::new(Vec::new());
        h.play_to_merge_ready(pixels(1, 1));
        h.press(Action::Split);
        h.take_sounds();
        h.run(2.0);
        h.press(Action::Split);
        assert!(!h.take_sounds().contains(&CueKind::EnergyBuildup));
        h.run(1.5);
        assert_eq!(h.game.phase(), Phase::Reveal);
    }

    #[test]
    fn actions_outside_their_phase_are_ignored() {
        let mut h = Harness::new(Vec::new());
        h.press(Action::Split);
        h.press(Action::Reset);
        assert_eq!(h.game.phase(), Phase::Intro);

        h.press(Action::Start);
        h.take_ui();
        h.press(Action::Start);
        assert_eq!(h.game.phase(), Phase::Selection);
        assert!(!h.take_ui().iter().any(|c| matches!(c, UiCommand::FillMosaic { .. })));
        h.press(Action::Reset);
        assert_eq!(h.game.phase(), Phase::Selection);
    }

    #[test]
    fn reset_cycles_through_rounds() {
        let mut h = Harness::new(vec![
            round("a.jpg", "l.jpg", "r.jpg", "X", "Y"),
            round("b.jpg", "l2.jpg", "r2.jpg", "P", "Q"),
        ]);
        h.play_to_merge_ready(pixels(1, 1));
        h.press(Action::Split);
        h.run(3.5);
        assert_eq!(h.game.phase(), Phase::Reveal);
        h.take_ui();

        h.press(Action::Reset);
        assert_eq!(h.game.phase(), Phase::Selection);
        assert_eq!(h.game.sequencer().rounds().index(), 1);
        let ui = h.take_ui();
        assert!(ui.contains(&UiCommand::remove_class(Element::SplitButton, UiClass::Hidden)));
        assert!(ui.contains(&UiCommand::add_class(Element::SplitContainer, UiClass::Hidden)));
        assert!(ui.contains(&UiCommand::set_style(Element::SplitLeft, "transform", "none")));
        assert_eq!(screens_shown(&ui), vec![Screen::Selection]);
        h.assert_one_screen();

        h.run(4.1);
        assert_eq!(texts(&h.ui, Element::ClueText), vec!["P X Q"]);
        h.run(5.0);
        assert_eq!(h.answer(pixels(1, 1)), "b.jpg");
        h.run(DT);
        h.press(Action::Split);
        h.run(3.5);
        h.press(Action::Reset);
        assert_eq!(h.game.sequencer().rounds().index(), 0);
    }

    #[test]
    fn scanning_stops_when_merge_begins() {
        let mut h = Harness::new(Vec::new());
        h.press(Action::Start);
        h.run(4.0);
        assert_eq!(h.game.phase(), Phase::Merge);
        let blips = h.take_sounds().iter().filter(|k| **k == CueKind::ScanBlip).count();
        assert!((38..=41).contains(&blips), "{} blips", blips);
        assert!(!h.ctx.audio.is_looping());

        h.run(2.0);
        assert!(!h.take_sounds().contains(&CueKind::ScanBlip));

        // every highlighted cell was switched back off
        let mut last = std::collections::HashMap::new();
        for c in &h.ui {
            if let UiCommand::SetPhasing { cell, on } = c {
                last.insert(*cell, *on);
            }
        }
        assert!(!last.is_empty());
        assert!(last.values().all(|on| !on));
    }

    #[test]
    fn first_action_resumes_audio_once() {
        let mut h = Harness::new(Vec::new());
        let mut hover = InputQueue::new();
        hover.push(InputEvent::Hover);
        h.step(&hover);
        assert_eq!(h.take_sounds(), vec![CueKind::Hover]);
        assert!(!h.take_ui().contains(&UiCommand::ResumeAudio));

        h.press(Action::Split);
        h.press(Action::Start);
        let resumes = h.take_ui().iter().filter(|c| **c == UiCommand::ResumeAudio).count();
        assert_eq!(resumes, 1);
        assert_eq!(
            h.take_sounds().iter().filter(|k| **k == CueKind::Click).count(),
            2
        );
    }

    #[test]
    fn strip_image_is_squeezed_and_flow_continues() {
        let mut h = Harness::new(Vec::new());
        h.game.load_config(r#"{ "surface_baseline": 10 }"#).unwrap();
        h.play_to_merge_ready(pixels(3334, 1));
        let ui = h.take_ui();
        assert!(ui.contains(&UiCommand::ResizeSurface {
            width: MAX_SURFACE_DIMENSION,
            height: 10
        }));
        assert!(ui.iter().any(|c| matches!(c, UiCommand::PresentSurface { .. })));

        h.press(Action::Split);
        h.run(3.5);
        assert_eq!(h.game.phase(), Phase::Reveal);
    }

    #[test]
    fn rejected_config_keeps_previous_timing() {
        let mut h = Harness::new(Vec::new());
        assert!(matches!(
            h.game.load_config(r#"{ "phasing_interval": 0 }"#),
            Err(FusionError::Config(_))
        ));
        assert_eq!(h.game.sequencer().config().phasing_interval, 0.1);

        h.press(Action::Start);
        h.take_ui();
        h.run(1.0);
        let lit = h
            .take_ui()
            .iter()
            .filter(|c| matches!(c, UiCommand::SetPhasing { on: true, .. }))
            .count();
        assert!((9..=11).contains(&lit), "{} highlights in one second", lit);
    }

    #[test]
    fn config_overrides_durations_and_labels() {
        let mut h = Harness::new(Vec::new());
        h.game
            .load_config(r#"{ "scan_dwell": 1.0, "mosaic_cells": 12, "fallbacks": { "left_label": "ME" } }"#)
            .unwrap();
        h.press(Action::Start);
        assert!(h.ui.iter().any(|c| matches!(c, UiCommand::FillMosaic { cells } if cells.len() == 12)));
        h.run(1.0);
        assert_eq!(h.game.phase(), Phase::Merge);
        assert_eq!(texts(&h.ui, Element::ClueText), vec!["ME X AI"]);

        assert!(h.game.load_config("{").is_err());
        assert_eq!(h.game.sequencer().config().scan_dwell, 1.0);
    }
}
