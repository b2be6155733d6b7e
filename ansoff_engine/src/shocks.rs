/// Ansoff Engine — Shock Card Set
///
/// The fixed set of mobile-industry events every deck pass draws from.

use crate::domain::{Capability, Kpi, ShockCard, ShockEffect};

/// Build the standard five-card set, in catalog order.
pub fn standard_cards() -> Vec<ShockCard> {
    vec![
        ShockCard {
            title: "Chipset shortage hits flagship builds".to_string(),
            text: "Lead times spike. Flagship availability and channel fill rates drop for two quarters."
                .to_string(),
            effects: vec![
                ShockEffect::capability(Capability::SupplyChain, -8.0),
                ShockEffect::kpi(Kpi::RevenueIndex, -4.5),
                ShockEffect::kpi(Kpi::Risk, 6.0),
            ],
        },
        ShockCard {
            title: "Carrier shifts promo dollars to a rival".to_string(),
            text: "A key carrier partner reduces co-op marketing and store placement this quarter."
                .to_string(),
            effects: vec![
                ShockEffect::capability(Capability::RetailCarrierChannels, -6.0),
                ShockEffect::kpi(Kpi::MarketSharePct, -0.6),
                ShockEffect::kpi(Kpi::RevenueIndex, -2.5),
            ],
        },
        ShockCard {
            title: "Privacy regulation slows feature launches".to_string(),
            text: "Compliance work increases and your release cadence slows this quarter.".to_string(),
            effects: vec![
                ShockEffect::capability(Capability::SoftwareServices, -5.0),
                ShockEffect::kpi(Kpi::GrossMarginPct, -1.0),
                ShockEffect::kpi(Kpi::Risk, 4.0),
            ],
        },
        ShockCard {
            title: "Competitor launches a disruptive camera feature".to_string(),
            text: "Perceived innovation gap shows up in reviews and social buzz.".to_string(),
            effects: vec![
                ShockEffect::capability(Capability::Brand, -5.0),
                ShockEffect::kpi(Kpi::MarketSharePct, -0.5),
                ShockEffect::kpi(Kpi::Optionality, -2.0),
            ],
        },
        ShockCard {
            title: "FX swing boosts profitability in one region".to_string(),
            text: "A currency move benefits your cost base and margins this quarter.".to_string(),
            effects: vec![
                ShockEffect::kpi(Kpi::GrossMarginPct, 1.2),
                ShockEffect::kpi(Kpi::Cash, 6.0),
            ],
        },
    ]
}
