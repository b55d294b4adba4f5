use fusion_engine::{AssetPool, Countdown, EngineContext, Interval, Rng, Shard, UiCommand};

/// Decorative shards drifting behind the intro screen.
pub fn spawn_shards(count: usize, pool: &AssetPool, rng: &mut Rng) -> Vec<Shard> {
    (0..count)
        .map(|_| Shard {
            left_vw: rng.range_f32(0.0, 100.0),
            delay_s: rng.range_f32(0.0, 5.0),
            size_px: rng.range_f32(30.0, 80.0),
            src: pool.pick(rng),
        })
        .collect()
}

/// The scanning grid: a random cell lights up every `interval` and stays lit for `hold`.
#[derive(Debug, Clone)]
pub struct Mosaic {
    cells: usize,
    interval: Interval,
    hold: f32,
    lit: Vec<(usize, Countdown)>,
}

impl Mosaic {
    pub fn new(cells: usize, interval: f32, hold: f32) -> Self {
        Self {
            cells,
            interval: Interval::new(interval),
            hold,
            lit: Vec::new(),
        }
    }

    /// One random pool image per cell.
    pub fn fill(&self, pool: &AssetPool, rng: &mut Rng) -> Vec<String> {
        (0..self.cells).map(|_| pool.pick(rng)).collect()
    }

    pub fn lit_count(&self) -> usize {
        self.lit.len()
    }

    pub fn tick(&mut self, dt: f32, ctx: &mut EngineContext) {
        // expire first so a highlight lasts exactly `hold`
        let mut expired = Vec::new();
        self.lit.retain_mut(|(cell, timer)| {
            if timer.tick(dt) {
                expired.push(*cell);
                false
            } else {
                true
            }
        });
        for cell in expired {
            ctx.emit_ui(UiCommand::SetPhasing { cell, on: false });
        }

        let fired = self.interval.tick(dt);
        if self.cells == 0 {
            return;
        }
        for _ in 0..fired {
            let cell = ctx.rng.next_int(self.cells as u32) as usize;
            self.lit.push((cell, Countdown::start(self.hold)));
            ctx.emit_ui(UiCommand::SetPhasing { cell, on: true });
        }
    }

    /// Stop highlighting and switch off every cell still lit.
    pub fn stop(&mut self, ctx: &mut EngineContext) {
        self.interval.reset();
        for (cell, _) in self.lit.drain(..) {
            ctx.emit_ui(UiCommand::SetPhasing { cell, on: false });
        }
    }
}
