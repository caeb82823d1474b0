/// Closed enumerations over the model's free-text labels.
///
/// The model is asked for labels like "Left-leaning" or "Objective" but is
/// not bound to them. Each classifier matches case-insensitively and falls
/// into a documented default bucket when nothing matches.

/// Political leaning of a source. Default: [`Bias::Other`]
/// (e.g. "Corporate", "Scientific").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bias {
    Left,
    Right,
    Neutral,
    Other,
}

impl Bias {
    /// Substring match, checked in the order left, right, neutral.
    #[must_use]
    pub fn classify(label: &str) -> Self {
        let l = label.to_lowercase();
        if l.contains("left") {
            Self::Left
        } else if l.contains("right") {
            Self::Right
        } else if l.contains("neutral") {
            Self::Neutral
        } else {
            Self::Other
        }
    }

    /// Horizontal position on the 0–100 landscape axis.
    #[must_use]
    pub fn axis_position(self) -> f64 {
        match self {
            Self::Left => 10.0,
            Self::Right => 90.0,
            Self::Neutral | Self::Other => 50.0,
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Left => "bias-left",
            Self::Right => "bias-right",
            Self::Neutral => "bias-neutral",
            Self::Other => "bias-other",
        }
    }
}

/// Tone of a source. Default: [`Tone::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Objective,
    Opinionated,
    Promotional,
    Satirical,
    Other,
}

impl Tone {
    #[must_use]
    pub fn classify(label: &str) -> Self {
        let l = label.to_lowercase();
        if l.contains("objective") {
            Self::Objective
        } else if l.contains("opinionated") {
            Self::Opinionated
        } else if l.contains("promotional") {
            Self::Promotional
        } else if l.contains("satirical") {
            Self::Satirical
        } else {
            Self::Other
        }
    }

    /// Vertical position on the 0–100 landscape axis (100 = most objective).
    #[must_use]
    pub fn axis_position(self) -> f64 {
        match self {
            Self::Objective => 90.0,
            Self::Opinionated => 10.0,
            Self::Promotional => 30.0,
            Self::Satirical => 50.0,
            Self::Other => 60.0,
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Objective => "tone-objective",
            Self::Opinionated => "tone-opinionated",
            _ => "tone-other",
        }
    }

    /// Tag colour for a source's tone label. Unlike [`Tone::classify`] this
    /// matches the whole label, so "Mostly objective" gets the neutral colour.
    #[must_use]
    pub fn tag_class(label: &str) -> &'static str {
        match label.trim().to_lowercase().as_str() {
            "objective" => Self::Objective.css_class(),
            "opinionated" => Self::Opinionated.css_class(),
            _ => Self::Other.css_class(),
        }
    }
}

/// Sentiment of a source. Exact match only; anything else is
/// [`Sentiment::Neutral`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    #[must_use]
    pub fn classify(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "positive" => Self::Positive,
            "negative" => Self::Negative,
            _ => Self::Neutral,
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Positive => "sentiment-positive",
            Self::Negative => "sentiment-negative",
            Self::Neutral => "sentiment-neutral",
        }
    }
}

/// Coarse class of a verdict string, used for colouring only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerdictClass {
    True,
    False,
    Misleading,
    Unknown,
}

impl VerdictClass {
    /// Negations are checked before "true" so "Untrue" and "Not true" do not
    /// read as true.
    #[must_use]
    pub fn classify(verdict: &str) -> Self {
        let v = verdict.to_lowercase();
        if v.contains("false") || v.contains("untrue") || v.contains("not true") {
            Self::False
        } else if v.contains("misleading") {
            Self::Misleading
        } else if v.contains("true") {
            Self::True
        } else {
            Self::Unknown
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::True => "verdict-true",
            Self::False => "verdict-false",
            Self::Misleading => "verdict-misleading",
            Self::Unknown => "verdict-unknown",
        }
    }
}

/// Colour band of the truth meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeterBand {
    Low,
    Medium,
    High,
}

impl MeterBand {
    /// Bands: below 25, below 75, the rest. Expects a clamped score.
    #[must_use]
    pub fn for_score(score: f64) -> Self {
        if score < 25.0 {
            Self::Low
        } else if score < 75.0 {
            Self::Medium
        } else {
            Self::High
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Low => "meter-low",
            Self::Medium => "meter-medium",
            Self::High => "meter-high",
        }
    }
}
