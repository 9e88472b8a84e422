use crate::error::{Error, Result};

const RATE_EPSILON: f64 = 1e-9;

/// A selectable rebate tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateTier {
    /// Fraction in (0, 1]
    pub rate: f64,
    pub name: &'static str,
    pub label: &'static str,
}

static TIERS: [RateTier; 8] = [
    RateTier {
        rate: 0.01,
        name: "Courtesy support",
        label: "Courtesy support (1%)",
    },
    RateTier {
        rate: 0.05,
        name: "Base rebate",
        label: "Base rebate (5%)",
    },
    RateTier {
        rate: 0.10,
        name: "Junior agent",
        label: "Junior agent (10%)",
    },
    RateTier {
        rate: 0.15,
        name: "Intermediate agent",
        label: "Intermediate agent (15%)",
    },
    RateTier {
        rate: 0.20,
        name: "Senior partner",
        label: "Senior partner (20%)",
    },
    RateTier {
        rate: 0.30,
        name: "Special channel",
        label: "Special channel (30%)",
    },
    RateTier {
        rate: 0.45,
        name: "Core strategic",
        label: "Core strategic (45%)",
    },
    RateTier {
        rate: 0.60,
        name: "Premier partner",
        label: "Premier partner (60%)",
    },
];

/// All tiers in ascending rate order
pub fn tiers() -> &'static [RateTier] {
    &TIERS
}

/// Look up the tier with exactly this rate
pub fn find(rate: f64) -> Option<&'static RateTier> {
    TIERS.iter().find(|t| (t.rate - rate).abs() < RATE_EPSILON)
}

/// Resolve user input to a catalog rate.
///
/// Accepts a fraction (`0.1`), a percentage (`10%`) or a bare whole-number
/// percentage (`10`). Anything that does not land on a catalog tier is rejected.
pub fn parse_rate(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let invalid = || {
        let known: Vec<String> = TIERS.iter().map(|t| percent_label(t.rate)).collect();
        Error::InvalidArgument(format!(
            "Unknown rebate tier '{}'. Available: {}",
            text,
            known.join(", ")
        ))
    };

    let value = if let Some(pct) = trimmed.strip_suffix('%') {
        pct.trim().parse::<f64>().map_err(|_| invalid())? / 100.0
    } else {
        let v = trimmed.parse::<f64>().map_err(|_| invalid())?;
        if v >= 1.0 { v / 100.0 } else { v }
    };

    find(value).map(|t| t.rate).ok_or_else(invalid)
}

/// Rate as a percentage string: `0.1` -> `10%`, `0.125` -> `12.5%`
pub fn percent_label(rate: f64) -> String {
    let pct = (rate * 10_000.0).round() / 100.0;
    let mut s = format!("{:.2}", pct);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    format!("{}%", s)
}
