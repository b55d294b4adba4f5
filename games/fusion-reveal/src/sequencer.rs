use fusion_engine::{
    Action, Announcement, AssetPool, AudioCues, Countdown, CueKind, Element, EngineContext,
    ImageRequest, RgbaImage, RoundRecord, RoundStore, Screen, ScreenRegistry, Surface, UiClass,
    UiCommand,
};

use fusion_engine::compositor::{pixels::is_blank, surface::EMPTY_DATA_URL};

use crate::config::{FusionConfig, ResolvedRound};
use crate::mosaic::{spawn_shards, Mosaic};

/// Externally visible phase, reported to the host as a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Phase {
    Intro = 0,
    Selection = 1,
    Merge = 2,
    Reveal = 3,
}

impl Phase {
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Progress through the merge screen.
#[derive(Debug, Clone, PartialEq)]
enum MergeStep {
    /// Clue on screen, sphere faded out.
    Clue { dwell: Countdown },
    /// Waiting for the host to decode the merged image.
    Loading { request: ImageRequest },
    /// Composite presented; Split is accepted.
    Ready,
    /// Energy buildup running before the reveal.
    Infusing { dwell: Countdown },
}

#[derive(Debug, Clone)]
enum PhaseState {
    Intro,
    Selection {
        dwell: Countdown,
        mosaic: Mosaic,
        round: Option<RoundRecord>,
    },
    Merge {
        round: ResolvedRound,
        step: MergeStep,
    },
    Reveal,
}

/// Drives the four screens. All timing comes from fixed-step ticks.
pub struct Sequencer {
    state: PhaseState,
    screens: ScreenRegistry,
    rounds: RoundStore,
    pool: AssetPool,
    surface: Surface,
    config: FusionConfig,
}

impl Sequencer {
    pub fn new(config: FusionConfig) -> Self {
        let pool = pool_for(&config);
        Self {
            state: PhaseState::Intro,
            screens: ScreenRegistry::new(),
            rounds: RoundStore::default(),
            pool,
            surface: Surface::new(0, 0),
            config,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            PhaseState::Intro => Phase::Intro,
            PhaseState::Selection { .. } => Phase::Selection,
            PhaseState::Merge { .. } => Phase::Merge,
            PhaseState::Reveal => Phase::Reveal,
        }
    }

    /// True once the composite is up and Split would be accepted.
    pub fn merge_ready(&self) -> bool {
        matches!(self.state, PhaseState::Merge { step: MergeStep::Ready, .. })
    }

    pub fn screens(&self) -> &ScreenRegistry {
        &self.screens
    }

    pub fn rounds(&self) -> &RoundStore {
        &self.rounds
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    /// Replace the round list. A round already captured by Selection is kept.
    pub fn set_rounds(&mut self, rounds: RoundStore) {
        self.rounds = rounds;
    }

    /// Swap tuning. Durations already counting down keep their old length.
    pub fn set_config(&mut self, config: FusionConfig) {
        self.pool = pool_for(&config);
        self.config = config;
    }

    pub fn init(&mut self, ctx: &mut EngineContext) {
        ctx.emit_ui(UiCommand::ShowScreen { screen: self.screens.active() });
        let shards = spawn_shards(self.config.shard_count, &self.pool, &mut ctx.rng);
        ctx.emit_ui(UiCommand::SpawnShards { shards });
    }

    pub fn handle(&mut self, action: Action, ctx: &mut EngineContext) {
        let accepted = match action {
            Action::Start => matches!(self.state, PhaseState::Intro),
            Action::Split => self.merge_ready(),
            Action::Reset => matches!(self.state, PhaseState::Reveal),
        };
        if !accepted {
            log::debug!("ignoring {:?} during {:?}", action, self.phase());
            return;
        }
        match action {
            Action::Start => self.enter_selection(ctx),
            Action::Split => self.begin_split(ctx),
            Action::Reset => self.reset(ctx),
        }
    }

    /// Advance the active phase by one fixed step.
    pub fn tick(&mut self, ctx: &mut EngineContext) {
        let dt = ctx.dt();
        match &mut self.state {
            PhaseState::Intro | PhaseState::Reveal => {}
            PhaseState::Selection { dwell, mosaic, round } => {
                mosaic.tick(dt, ctx);
                if dwell.tick(dt) {
                    mosaic.stop(ctx);
                    let round = round.take();
                    ctx.audio.stop_loop();
                    self.enter_merge(round, ctx);
                }
            }
            PhaseState::Merge { round, step } => match step {
                MergeStep::Clue { dwell } => {
                    if dwell.tick(dt) {
                        ctx.emit_ui(UiCommand::add_class(Element::ClueOverlay, UiClass::Hidden));
                        ctx.emit_ui(UiCommand::remove_class(Element::SphereWrapper, UiClass::FadedOut));
                        ctx.emit_ui(UiCommand::remove_class(Element::MergeControls, UiClass::FadedOut));
                        let request = ctx.images.request();
                        ctx.emit_ui(UiCommand::LoadImage {
                            request: request.0,
                            src: round.merged_image.clone(),
                        });
                        *step = MergeStep::Loading { request };
                    }
                }
                MergeStep::Loading { request } => {
                    if let Some(result) = ctx.images.take(*request) {
                        let round = round.clone();
                        *step = MergeStep::Ready;
                        self.present_merge(&round, result.into_image(), ctx);
                    }
                }
                MergeStep::Ready => {}
                MergeStep::Infusing { dwell } => {
                    if dwell.tick(dt) {
                        self.enter_reveal(ctx);
                    }
                }
            },
        }
    }

    // ---- Transitions ----

    fn show(&mut self, screen: Screen, ctx: &mut EngineContext) {
        if self.screens.activate(screen) {
            ctx.emit_ui(UiCommand::ShowScreen { screen });
        }
    }

    fn enter_selection(&mut self, ctx: &mut EngineContext) {
        self.show(Screen::Selection, ctx);
        ctx.audio.play_cue(CueKind::Transition);
        ctx.audio.start_loop();
        ctx.emit_ui(UiCommand::Speak {
            announcement: Announcement::robotic(self.config.announcement.clone()),
        });

        let mosaic = Mosaic::new(
            self.config.mosaic_cells,
            self.config.phasing_interval,
            self.config.phasing_hold,
        );
        let cells = mosaic.fill(&self.pool, &mut ctx.rng);
        ctx.emit_ui(UiCommand::FillMosaic { cells });

        let round = self.rounds.current().cloned();
        log::info!(
            "scanning (round {} of {})",
            self.rounds.index() + 1,
            self.rounds.len()
        );
        self.state = PhaseState::Selection {
            dwell: Countdown::start(self.config.scan_dwell),
            mosaic,
            round,
        };
    }

    fn enter_merge(&mut self, record: Option<RoundRecord>, ctx: &mut EngineContext) {
        self.show(Screen::Merge, ctx);
        ctx.audio.play_cue(CueKind::Transition);

        let round = ResolvedRound::resolve(record.as_ref(), &self.config.fallbacks);
        if !round.from_data {
            log::warn!("no round data, merging fallback images");
        }
        ctx.emit_ui(UiCommand::set_text(Element::ClueText, round.clue()));
        ctx.emit_ui(UiCommand::remove_class(Element::ClueOverlay, UiClass::Hidden));
        ctx.emit_ui(UiCommand::add_class(Element::SphereWrapper, UiClass::FadedOut));
        ctx.emit_ui(UiCommand::add_class(Element::MergeControls, UiClass::FadedOut));

        log::info!("merging {}", round.clue());
        self.state = PhaseState::Merge {
            round,
            step: MergeStep::Clue {
                dwell: Countdown::start(self.config.clue_dwell),
            },
        };
    }

    /// Composite the merged image (a failed load arrives empty) and fill the reveal screen.
    fn present_merge(&mut self, round: &ResolvedRound, image: RgbaImage, ctx: &mut EngineContext) {
        if is_blank(&image) {
            log::warn!("merged image {} unavailable, presenting blank surface", round.merged_image);
        }
        let ratio = self.surface.fit_image(&image, self.config.surface_baseline);
        ctx.emit_ui(UiCommand::ResizeSurface {
            width: self.surface.width(),
            height: self.surface.height(),
        });
        ctx.emit_ui(UiCommand::set_style(Element::EnergySphere, "aspect-ratio", ratio.to_string()));

        self.surface.clear();
        self.surface.draw_full(&image);
        let data_url = self.surface.export_data_url().unwrap_or_else(|e| {
            log::warn!("{}, presenting an empty surface", e);
            EMPTY_DATA_URL.to_string()
        });
        let background = format!("url({})", data_url);
        ctx.emit_ui(UiCommand::PresentSurface { data_url });
        ctx.emit_ui(UiCommand::set_style(Element::SplitLeft, "background-image", background.clone()));
        ctx.emit_ui(UiCommand::set_style(Element::SplitRight, "background-image", background));

        ctx.emit_ui(UiCommand::set_image(Element::RevealMerged, round.merged_image.clone()));
        ctx.emit_ui(UiCommand::set_image(Element::RevealImageLeft, round.left_image.clone()));
        ctx.emit_ui(UiCommand::set_image(Element::RevealImageRight, round.right_image.clone()));
        ctx.emit_ui(UiCommand::set_text(Element::RevealNameLeft, round.left_label.clone()));
        ctx.emit_ui(UiCommand::set_text(Element::RevealNameRight, round.right_label.clone()));
        if round.from_data {
            ctx.emit_ui(UiCommand::set_text(
                Element::RevealCenterName,
                self.config.fallbacks.center_caption.clone(),
            ));
        }
    }

    fn begin_split(&mut self, ctx: &mut EngineContext) {
        ctx.emit_ui(UiCommand::add_class(Element::SplitButton, UiClass::Hidden));
        ctx.audio.play_cue(CueKind::EnergyBuildup);
        ctx.emit_ui(UiCommand::add_class(Element::EnergySphere, UiClass::Infusing));
        if let PhaseState::Merge { step, .. } = &mut self.state {
            *step = MergeStep::Infusing {
                dwell: Countdown::start(self.config.split_dwell),
            };
        }
    }

    fn enter_reveal(&mut self, ctx: &mut EngineContext) {
        self.show(Screen::Reveal, ctx);
        ctx.emit_ui(UiCommand::remove_class(Element::EnergySphere, UiClass::Infusing));
        ctx.audio.play_cue(CueKind::Transition);
        log::info!("revealed");
        self.state = PhaseState::Reveal;
    }

    fn reset(&mut self, ctx: &mut EngineContext) {
        ctx.emit_ui(UiCommand::remove_class(Element::SplitButton, UiClass::Hidden));
        ctx.emit_ui(UiCommand::set_style(Element::MergeCanvas, "opacity", "1"));
        ctx.emit_ui(UiCommand::remove_class(Element::EnergySphere, UiClass::Infusing));
        ctx.emit_ui(UiCommand::add_class(Element::SplitContainer, UiClass::Hidden));
        ctx.emit_ui(UiCommand::set_style(Element::SplitContainer, "opacity", "1"));
        ctx.emit_ui(UiCommand::set_style(Element::SplitContainer, "transition", "none"));
        ctx.emit_ui(UiCommand::set_style(Element::SplitLeft, "transform", "none"));
        ctx.emit_ui(UiCommand::set_style(Element::SplitRight, "transform", "none"));

        self.rounds.advance();
        self.enter_selection(ctx);
    }
}

fn pool_for(config: &FusionConfig) -> AssetPool {
    config.asset_pool().unwrap_or_else(|e| {
        log::warn!("{}, using the default asset pool", e);
        AssetPool::default()
    })
}
