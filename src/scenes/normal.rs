use crate::config::fx::FxConfig;
use crate::foundation::core::Millis;
use crate::ports::engine::ParticleShape;
use crate::runtime::stage::Stage;
use crate::runtime::timeline::Timeline;
use crate::scenes::SceneScript;
use crate::scenes::common::{burst, flash, glow, reveal_title, scatter, title_for};

/// Short default reveal used for every key without a dedicated scene.
pub struct Normal;

impl SceneScript for Normal {
    fn name(&self) -> &'static str {
        "normal"
    }

    fn defaults(&self) -> FxConfig {
        FxConfig::new()
            .num("particleCount", 40.0)
            .num("sparkCount", 12.0)
            .num("glowIntensity", 0.6)
            .text("title", "")
            .text("subtitle", "")
    }

    fn timeline(&self, _stage: &Stage) -> Timeline {
        Timeline::new(Millis(4000))
            .phase(Millis(0), "flash", |s| {
                let r = s.rarity().clone();
                flash(s, r.color.lighten(0.5), Millis(400));
                glow(s, r.glow_color, Millis(1800), s.fx().number("glowIntensity"));
            })
            .phase(Millis(300), "burst", |s| {
                burst(
                    s,
                    s.rarity().particle_color,
                    s.fx().count("particleCount"),
                    ParticleShape::Circle,
                );
            })
            .phase(Millis(500), "sparkles", |s| {
                let color = s.rarity().particle_color;
                let n = s.fx().count("sparkCount");
                scatter(s, "nr-spark", n, (50.0, 50.0), 30.0, color, (Millis(600), Millis(1400)));
            })
            .phase(Millis(900), "reveal", |s| {
                let title = title_for(s, "NEW DISCOVERY");
                let sub = s.fx().string("subtitle").to_owned();
                reveal_title(s, &title, &sub, s.rarity().color, Millis(2600));
            })
    }
}
