use crate::labels::MeterBand;

/// Semicircular confidence gauge.
///
/// Maps a 0–100 confidence score onto a needle sweeping from -90° (left) to
/// +90° (right).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruthMeter {
    score: f64,
}

impl TruthMeter {
    /// Clamp `score` into 0–100. Non-finite scores read as 0.
    #[must_use]
    pub fn new(score: f64) -> Self {
        let score = if score.is_finite() {
            score.clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self { score }
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Score rounded for display.
    #[must_use]
    pub fn display_score(&self) -> u8 {
        self.score.round() as u8
    }

    /// Needle rotation in degrees.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.score / 100.0 * 180.0 - 90.0
    }

    #[must_use]
    pub fn band(&self) -> MeterBand {
        MeterBand::for_score(self.score)
    }

    /// Gauge markup: arc, needle and percentage label.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            r##"<div class="meter">
<svg viewBox="0 0 100 50" class="meter-gauge" role="img" aria-label="Confidence {score}%">
<defs><linearGradient id="meter-gradient" x1="0%" y1="0%" x2="100%" y2="0%">
<stop offset="0%" stop-color="#ef4444"/><stop offset="50%" stop-color="#facc15"/><stop offset="100%" stop-color="#22c55e"/>
</linearGradient></defs>
<path d="M 10 40 A 30 30 0 0 1 90 40" fill="none" stroke="url(#meter-gradient)" stroke-width="10" stroke-linecap="round"/>
<g transform="translate(50, 40) rotate({angle:.1})">
<polygon points="0,0 -3,-20 3,-20" fill="#e2e8f0"/>
<circle cx="0" cy="0" r="4" fill="#e2e8f0"/>
</g>
</svg>
<div class="meter-label {band}"><span class="meter-score">{score}</span><span class="meter-pct">%</span><p>Confidence</p></div>
</div>"##,
            score = self.display_score(),
            angle = self.angle(),
            band = self.band().css_class(),
        )
    }
}
