//! Pain point catalog
//!
//! The six scenarios are a closed set. Each one carries its display text and
//! the longer explanation shown by `roi explain`.

use serde::{Deserialize, Serialize};

/// Identifier of one of the six pain points
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PainId {
    Pain1,
    Pain2,
    Pain3,
    Pain4,
    Pain5,
    Pain6,
}

/// Narrative shown when a user asks how a pain point arises
#[derive(Debug, Clone, Copy)]
pub struct Explanation {
    pub scenario: &'static str,
    pub problem: &'static str,
    pub solution: &'static str,
    pub example: &'static str,
}

impl PainId {
    /// All pain points in display order
    pub const ALL: [PainId; 6] = [
        PainId::Pain1,
        PainId::Pain2,
        PainId::Pain3,
        PainId::Pain4,
        PainId::Pain5,
        PainId::Pain6,
    ];

    /// Numeric id, 1 through 6
    pub fn number(&self) -> u8 {
        match self {
            PainId::Pain1 => 1,
            PainId::Pain2 => 2,
            PainId::Pain3 => 3,
            PainId::Pain4 => 4,
            PainId::Pain5 => 5,
            PainId::Pain6 => 6,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PainId::Pain1 => "Color Rejection After Stretching",
            PainId::Pain2 => "Missed R&D Opportunities",
            PainId::Pain3 => "Small Batch Customer Trials",
            PainId::Pain4 => "Innovation Blocked",
            PainId::Pain5 => "Competitive Pressure & Recycled Material",
            PainId::Pain6 => "Peak Season Nightmare",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PainId::Pain1 => "Loss from trial batches rejected after production because lab samples don't match stretched reality",
            PainId::Pain2 => "Savings lost by skipping trials of cheaper pigments because production lines can't be spared",
            PainId::Pain3 => "Material wastage or lost customers when you can't produce small 5-10 kg trial quantities",
            PainId::Pain4 => "Cost savings and improvements never realized because experiments require stopping production",
            PainId::Pain5 => "Profit lost to competitors who tested and adopted recycled material blends while you couldn't",
            PainId::Pain6 => "Production stoppage during most profitable season for urgent customer color trials",
        }
    }

    /// Whether the pain's own inputs are counted per year (monthly is derived)
    /// rather than per month (annual is derived)
    pub fn is_annual_input(&self) -> bool {
        matches!(self, PainId::Pain3 | PainId::Pain4 | PainId::Pain6)
    }

    pub fn explanation(&self) -> Explanation {
        match self {
            PainId::Pain1 => Explanation {
                scenario: "Picture this: Your masterbatch colour looks exactly what the customer wanted. Sample approved. You run the full production batch. You ship the order. Two weeks later, your phone rings.",
                problem: "\"The color faded after stretching. We're rejecting the entire batch.\" This happens because lab samples don't go through the same stretching process as production. The color you see in your lab is NOT the color your customer gets.",
                solution: "The 25mm Lab Raffia Tape Line stretches the tape exactly like your production line (5.5 to 7.0 stretch ratios). You test with just 4.5-6 kg of material instead of 1,000+ kg on production. The color you see is the color your customer gets.",
                example: "If you have 1 rejected trial per month at 200 kg/hr for 3 hours, that's 600 kg wasted × ₹110 (material + processing) = ₹66,000/month loss.",
            },
            PainId::Pain2 => Explanation {
                scenario: "A company is launching a new pigment in the market which is ₹10 lower in price. You want to try it out, but you have full regular orders running.",
                problem: "You say to your team: \"Ignore for the moment, we can't spare the machine for trials.\" You miss out on cost savings because you can't afford to stop production for R&D.",
                solution: "With the lab machine, you can test new pigments anytime without stopping production. Even a tiny ₹1/kg saving on a 200 kg/hr machine running 22 hrs/day, 25 days/month = ₹1,10,000/month in savings!",
                example: "One successful pigment trial can pay for itself many times over. If you find a pigment that's just ₹1 cheaper, that's ₹13,20,000/year in savings.",
            },
            PainId::Pain3 => Explanation {
                scenario: "A customer comes with a new product and wants you to develop the masterbatch for them. They need 5-10 kg for a trial run.",
                problem: "How do you create just 5-10 kg when your production line minimum is 1,000+ kg? You either refuse the customer or waste massive amounts on a small trial.",
                solution: "The lab line produces exactly the small quantities needed for customer trials. You can serve any customer request without production disruption.",
                example: "Assuming 3 such cases a year, each causing ₹25,000 in production loss and wastage = ₹75,000/year.",
            },
            PainId::Pain4 => Explanation {
                scenario: "A new lab in-charge has joined. They want to experiment with new recipes - changing chemicals or additives that could improve functionality or reduce costs.",
                problem: "Every experiment means stopping commercial production. Innovation gets killed because the cost of experimentation is too high.",
                solution: "The lab machine becomes your dedicated R&D tool. Your team can experiment freely, try new formulations, and innovate without touching production.",
                example: "Assuming 3 such experiments a year, each causing ₹25,000 in production loss = ₹75,000/year.",
            },
            PainId::Pain5 => Explanation {
                scenario: "A big competitor has dropped prices by ₹3/kg by using 20% good recycled material instead of 100% virgin. You've never used recycled material.",
                problem: "You want to experiment with 10-15% recycled material to stay competitive, but you can't risk production quality on untested formulations.",
                solution: "Test recycled material blends safely on the lab line. Find the perfect mix that maintains quality while reducing costs. Even ₹1/kg savings across multiple machines adds up fast.",
                example: "₹1/kg saving × 200 kg/hr × 22 hrs × 25 days = ₹1,10,000/month per machine. With 2 machines, that's ₹26,40,000/year!",
            },
            PainId::Pain6 => Explanation {
                scenario: "It's peak season (post-Diwali to March). Orders are at maximum. Suddenly, your biggest customer needs a new color development urgently.",
                problem: "You can't say no to your biggest customer, but stopping production for trials means losing regular orders and revenue. It's a lose-lose situation.",
                solution: "The lab machine handles urgent customer trials while your production lines keep running at full capacity. You never have to choose between serving key customers and maintaining production.",
                example: "Assuming 2 such peak season emergencies a year, each causing ₹25,000 in lost production = ₹50,000/year.",
            },
        }
    }
}

impl From<PainId> for u8 {
    fn from(id: PainId) -> Self {
        id.number()
    }
}

impl TryFrom<u8> for PainId {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(PainId::Pain1),
            2 => Ok(PainId::Pain2),
            3 => Ok(PainId::Pain3),
            4 => Ok(PainId::Pain4),
            5 => Ok(PainId::Pain5),
            6 => Ok(PainId::Pain6),
            _ => Err(format!("Invalid pain point id: {}. Use 1 through 6", n)),
        }
    }
}

impl std::fmt::Display for PainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl std::str::FromStr for PainId {
    type Err = String;

    /// Accepts `3`, `pain3` or `PAIN3`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let digits = lower.strip_prefix("pain").unwrap_or(&lower);
        digits
            .parse::<u8>()
            .map_err(|_| format!("Invalid pain point id: {}. Use 1 through 6", s))
            .and_then(PainId::try_from)
    }
}
