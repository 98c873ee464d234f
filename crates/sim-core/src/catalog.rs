//! Static reference data: economic phases, lifestyles, asset templates,
//! education programs and job ladders.
//!
//! Nothing here is mutated at runtime; lookups are by name or enum.

use serde::{Deserialize, Serialize};

/// Phase of the four-stage business cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EconomyPhase {
    Expansion,
    Peak,
    Recession,
    Recovery,
}

/// Duration range and market modifiers of one phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseParams {
    /// Minimum and maximum months spent in the phase.
    pub duration: (u32, u32),
    pub property_mod: f64,
    pub rent_mod: f64,
    pub business_mod: f64,
    pub stock_mod: f64,
    pub rate_mod: f64,
    pub vacancy_mod: f64,
    /// Monthly probability of losing a job while this phase is a recession.
    pub job_loss_risk: f64,
}

const EXPANSION: PhaseParams = PhaseParams {
    duration: (24, 48),
    property_mod: 1.1,
    rent_mod: 1.0,
    business_mod: 1.1,
    stock_mod: 1.15,
    rate_mod: 1.0,
    vacancy_mod: 0.7,
    job_loss_risk: 0.01,
};

const PEAK: PhaseParams = PhaseParams {
    duration: (6, 12),
    property_mod: 1.2,
    rent_mod: 1.05,
    business_mod: 1.05,
    stock_mod: 1.0,
    rate_mod: 1.2,
    vacancy_mod: 0.8,
    job_loss_risk: 0.02,
};

const RECESSION: PhaseParams = PhaseParams {
    duration: (12, 24),
    property_mod: 0.85,
    rent_mod: 0.9,
    business_mod: 0.8,
    stock_mod: 0.7,
    rate_mod: 0.8,
    vacancy_mod: 1.5,
    job_loss_risk: 0.08,
};

const RECOVERY: PhaseParams = PhaseParams {
    duration: (12, 24),
    property_mod: 0.95,
    rent_mod: 0.95,
    business_mod: 0.95,
    stock_mod: 1.1,
    rate_mod: 0.9,
    vacancy_mod: 1.0,
    job_loss_risk: 0.03,
};

impl EconomyPhase {
    /// All phases in cycle order.
    pub const ALL: [EconomyPhase; 4] = [
        EconomyPhase::Expansion,
        EconomyPhase::Peak,
        EconomyPhase::Recession,
        EconomyPhase::Recovery,
    ];

    pub fn params(self) -> &'static PhaseParams {
        match self {
            EconomyPhase::Expansion => &EXPANSION,
            EconomyPhase::Peak => &PEAK,
            EconomyPhase::Recession => &RECESSION,
            EconomyPhase::Recovery => &RECOVERY,
        }
    }

    /// The phase that follows this one in the fixed cycle.
    pub fn next(self) -> EconomyPhase {
        match self {
            EconomyPhase::Expansion => EconomyPhase::Peak,
            EconomyPhase::Peak => EconomyPhase::Recession,
            EconomyPhase::Recession => EconomyPhase::Recovery,
            EconomyPhase::Recovery => EconomyPhase::Expansion,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EconomyPhase::Expansion => "Expansion",
            EconomyPhase::Peak => "Peak",
            EconomyPhase::Recession => "Recession",
            EconomyPhase::Recovery => "Recovery",
        }
    }

    /// Announcement emitted when the economy enters this phase.
    pub fn entry_message(self) -> &'static str {
        match self {
            EconomyPhase::Expansion => "Economy entering expansion! Growth ahead.",
            EconomyPhase::Peak => "Economy at peak! Be cautious.",
            EconomyPhase::Recession => "Recession starting! Opportunities for the prepared.",
            EconomyPhase::Recovery => "Economy recovering! Good time to invest.",
        }
    }
}

/// Spending tier chosen by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifestyle {
    Frugal,
    Normal,
    Comfortable,
    Luxury,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LifestyleParams {
    /// Monthly living expenses at age 18.
    pub expenses: u32,
    pub salary_mod: f64,
    pub invest_access_mod: f64,
    pub description: &'static str,
}

impl Lifestyle {
    pub const ALL: [Lifestyle; 4] = [
        Lifestyle::Frugal,
        Lifestyle::Normal,
        Lifestyle::Comfortable,
        Lifestyle::Luxury,
    ];

    pub fn params(self) -> &'static LifestyleParams {
        const FRUGAL: LifestyleParams = LifestyleParams {
            expenses: 1200,
            salary_mod: 0.9,
            invest_access_mod: 0.9,
            description: "Live simply, save more",
        };
        const NORMAL: LifestyleParams = LifestyleParams {
            expenses: 1500,
            salary_mod: 1.0,
            invest_access_mod: 1.0,
            description: "Balanced lifestyle",
        };
        const COMFORTABLE: LifestyleParams = LifestyleParams {
            expenses: 2000,
            salary_mod: 1.1,
            invest_access_mod: 1.1,
            description: "Better networking",
        };
        const LUXURY: LifestyleParams = LifestyleParams {
            expenses: 3500,
            salary_mod: 1.2,
            invest_access_mod: 1.2,
            description: "Best opportunities",
        };
        match self {
            Lifestyle::Frugal => &FRUGAL,
            Lifestyle::Normal => &NORMAL,
            Lifestyle::Comfortable => &COMFORTABLE,
            Lifestyle::Luxury => &LUXURY,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Lifestyle::Frugal => "Frugal",
            Lifestyle::Normal => "Normal",
            Lifestyle::Comfortable => "Comfortable",
            Lifestyle::Luxury => "Luxury",
        }
    }
}

/// Rental property offered for purchase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropertyTemplate {
    pub name: &'static str,
    pub price: u32,
    pub gross_rent: u32,
    /// Annual appreciation rate.
    pub appreciation: f64,
    pub iq_req: u32,
    pub maintenance_rate: f64,
    pub tax_rate: f64,
    pub insurance_rate: f64,
    /// Annual vacancy probability before phase adjustment.
    pub vacancy_rate: f64,
}

/// Business offered for purchase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BusinessTemplate {
    pub name: &'static str,
    pub price: u32,
    pub base_income: u32,
    /// Annual growth rate of income and value.
    pub growth: f64,
    pub iq_req: u32,
    /// Annual failure probability before phase adjustment.
    pub failure_risk: f64,
}

/// Listed stock or cryptocurrency.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SecurityTemplate {
    pub name: &'static str,
    pub min_buy: u32,
    pub return_rate: f64,
    pub volatility: f64,
    /// Dividend yield for stocks, staking yield for crypto.
    pub yield_rate: f64,
    pub iq_req: u32,
}

macro_rules! property {
    ($name:expr, $price:expr, $rent:expr, $app:expr, $iq:expr, $maint:expr, $tax:expr, $ins:expr, $vac:expr) => {
        PropertyTemplate {
            name: $name,
            price: $price,
            gross_rent: $rent,
            appreciation: $app,
            iq_req: $iq,
            maintenance_rate: $maint,
            tax_rate: $tax,
            insurance_rate: $ins,
            vacancy_rate: $vac,
        }
    };
}

pub const PROPERTIES: [PropertyTemplate; 13] = [
    property!("Small Rental", 80_000, 900, 0.03, 10, 0.008, 0.01, 0.004, 0.08),
    property!("Duplex", 150_000, 1600, 0.035, 20, 0.008, 0.01, 0.004, 0.07),
    property!("Small Apartment", 300_000, 3200, 0.04, 35, 0.008, 0.01, 0.004, 0.06),
    property!("Commercial Property", 500_000, 5500, 0.03, 50, 0.006, 0.012, 0.005, 0.1),
    property!("Apartment Complex", 1_000_000, 11_000, 0.035, 70, 0.006, 0.01, 0.004, 0.05),
    property!("Townhouse", 120_000, 1400, 0.035, 15, 0.008, 0.01, 0.004, 0.07),
    property!("Single Family Home", 200_000, 2200, 0.032, 25, 0.008, 0.01, 0.004, 0.06),
    property!("Warehouse", 400_000, 4500, 0.028, 45, 0.006, 0.012, 0.005, 0.12),
    property!("Retail Storefront", 350_000, 4000, 0.03, 40, 0.007, 0.012, 0.005, 0.10),
    property!("Office Building", 750_000, 8500, 0.032, 60, 0.006, 0.012, 0.005, 0.08),
    property!("Mobile Home Park", 600_000, 7000, 0.035, 55, 0.007, 0.01, 0.004, 0.06),
    property!("Storage Units", 300_000, 3500, 0.03, 35, 0.005, 0.01, 0.003, 0.05),
    property!("Vacation Rental", 250_000, 3000, 0.04, 30, 0.009, 0.01, 0.005, 0.15),
];

macro_rules! business {
    ($name:expr, $price:expr, $income:expr, $growth:expr, $iq:expr, $risk:expr) => {
        BusinessTemplate {
            name: $name,
            price: $price,
            base_income: $income,
            growth: $growth,
            iq_req: $iq,
            failure_risk: $risk,
        }
    };
}

pub const BUSINESSES: [BusinessTemplate; 13] = [
    business!("Vending Route", 15_000, 250, 0.02, 15, 0.05),
    business!("E-commerce Store", 30_000, 500, 0.05, 25, 0.15),
    business!("Laundromat", 100_000, 1200, 0.03, 40, 0.08),
    business!("Franchise", 250_000, 3000, 0.04, 55, 0.10),
    business!("Tech Startup", 500_000, 2000, 0.15, 75, 0.30),
    business!("Food Truck", 25_000, 600, 0.04, 20, 0.12),
    business!("Coffee Shop", 80_000, 1500, 0.03, 35, 0.15),
    business!("Consulting Firm", 50_000, 1200, 0.06, 45, 0.10),
    business!("Rental Car Service", 120_000, 2000, 0.03, 50, 0.12),
    business!("Digital Marketing Agency", 60_000, 1800, 0.08, 40, 0.12),
    business!("Restaurant", 200_000, 4000, 0.04, 60, 0.25),
    business!("Gym/Fitness Center", 150_000, 3500, 0.05, 55, 0.15),
    business!("Online Education Platform", 100_000, 2500, 0.10, 50, 0.12),
];

macro_rules! security {
    ($name:expr, $min:expr, $ret:expr, $vol:expr, $yield_rate:expr, $iq:expr) => {
        SecurityTemplate {
            name: $name,
            min_buy: $min,
            return_rate: $ret,
            volatility: $vol,
            yield_rate: $yield_rate,
            iq_req: $iq,
        }
    };
}

pub const STOCKS: [SecurityTemplate; 10] = [
    security!("Coca-Cola (KO)", 500, 0.08, 0.15, 0.031, 5),
    security!("Tesla (TSLA)", 1000, 0.18, 0.40, 0.0, 20),
    security!("Apple (AAPL)", 500, 0.12, 0.25, 0.005, 10),
    security!("Microsoft (MSFT)", 500, 0.11, 0.22, 0.007, 10),
    security!("Johnson & Johnson (JNJ)", 500, 0.07, 0.18, 0.032, 5),
    security!("Amazon (AMZN)", 1000, 0.13, 0.30, 0.0, 15),
    security!("Berkshire Hathaway (BRK.B)", 500, 0.10, 0.20, 0.0, 25),
    security!("Visa (V)", 500, 0.14, 0.24, 0.007, 15),
    security!("Procter & Gamble (PG)", 500, 0.08, 0.16, 0.025, 5),
    security!("NVIDIA (NVDA)", 1000, 0.25, 0.50, 0.0, 30),
];

pub const CRYPTOCURRENCIES: [SecurityTemplate; 5] = [
    security!("Bitcoin (BTC)", 500, 0.18, 0.60, 0.0, 15),
    security!("Ethereum (ETH)", 400, 0.16, 0.50, 0.04, 12),
    security!("Tether (USDT)", 200, 0.02, 0.02, 0.05, 5),
    security!("BNB (BNB)", 300, 0.12, 0.40, 0.03, 10),
    security!("Solana (SOL)", 300, 0.20, 0.65, 0.05, 18),
];

pub fn find_property(name: &str) -> Option<&'static PropertyTemplate> {
    PROPERTIES.iter().find(|p| p.name == name)
}

pub fn find_business(name: &str) -> Option<&'static BusinessTemplate> {
    BUSINESSES.iter().find(|b| b.name == name)
}

pub fn find_stock(name: &str) -> Option<&'static SecurityTemplate> {
    STOCKS.iter().find(|s| s.name == name)
}

pub fn find_crypto(name: &str) -> Option<&'static SecurityTemplate> {
    CRYPTOCURRENCIES.iter().find(|c| c.name == name)
}

/// Credential earned by completing a multi-month program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegreeType {
    Certificate,
    Bachelors,
    Masters,
    Mba,
}

/// A course or degree program.
///
/// Instant programs (`months_required == 0`) grant their IQ on purchase;
/// degree programs run a monthly countdown first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EducationProgram {
    pub name: &'static str,
    pub price: u32,
    pub iq_gain: u32,
    pub months_required: u32,
    pub degree_type: Option<DegreeType>,
    pub degree_id: Option<&'static str>,
    pub prerequisites: &'static [&'static str],
    pub requires_any_bachelors: bool,
}

impl EducationProgram {
    pub fn is_instant(&self) -> bool {
        self.months_required == 0
    }
}

const fn course(name: &'static str, price: u32, iq_gain: u32) -> EducationProgram {
    EducationProgram {
        name,
        price,
        iq_gain,
        months_required: 0,
        degree_type: None,
        degree_id: None,
        prerequisites: &[],
        requires_any_bachelors: false,
    }
}

const fn degree(
    name: &'static str,
    price: u32,
    iq_gain: u32,
    months_required: u32,
    degree_type: DegreeType,
    degree_id: &'static str,
    prerequisites: &'static [&'static str],
) -> EducationProgram {
    EducationProgram {
        name,
        price,
        iq_gain,
        months_required,
        degree_type: Some(degree_type),
        degree_id: Some(degree_id),
        prerequisites,
        requires_any_bachelors: false,
    }
}

pub const EDUCATION: [EducationProgram; 11] = [
    course("Finance Books", 100, 5),
    course("Online Course", 400, 10),
    course("Mentorship", 3500, 18),
    degree("Software Bootcamp", 12_000, 12, 6, DegreeType::Certificate, "cs_bootcamp", &[]),
    degree(
        "Computer Science Bachelor's",
        40_000,
        25,
        48,
        DegreeType::Bachelors,
        "cs_bachelors",
        &[],
    ),
    degree(
        "Computer Science Master's",
        65_000,
        40,
        24,
        DegreeType::Masters,
        "cs_masters",
        &["cs_bachelors"],
    ),
    degree("Finance Bachelor's", 35_000, 22, 48, DegreeType::Bachelors, "finance_bachelors", &[]),
    degree(
        "Finance Master's",
        60_000,
        35,
        24,
        DegreeType::Masters,
        "finance_masters",
        &["finance_bachelors"],
    ),
    degree("Nursing Bachelor's", 38_000, 24, 48, DegreeType::Bachelors, "nursing_bachelors", &[]),
    degree(
        "Healthcare Leadership Master's",
        65_000,
        38,
        24,
        DegreeType::Masters,
        "health_masters",
        &["nursing_bachelors"],
    ),
    EducationProgram {
        requires_any_bachelors: true,
        ..degree("MBA Program", 70_000, 45, 24, DegreeType::Mba, "mba", &[])
    },
];

pub fn find_program(name: &str) -> Option<&'static EducationProgram> {
    EDUCATION.iter().find(|e| e.name == name)
}

/// Career field; each has its own eight-level ladder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobField {
    Tech,
    Finance,
    Healthcare,
    Sales,
    Education,
    Engineering,
    Law,
    Marketing,
}

/// Coarse degree requirement used when a position lists no specific degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EducationReq {
    None,
    Bachelors,
    Masters,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JobPosition {
    pub title: &'static str,
    pub base_salary: u32,
    pub education_req: EducationReq,
    pub iq_req: u32,
    /// Any one of these completed degrees satisfies the position.
    pub required_degrees: &'static [&'static str],
}

/// Generic level names and the tenure needed before promotion out of a level.
/// The top level never promotes.
pub const JOB_LEVELS: [(&str, u32); 8] = [
    ("Entry Level", 12),
    ("Junior", 18),
    ("Mid-Level", 24),
    ("Senior", 30),
    ("Manager", 36),
    ("Director", 48),
    ("VP", 60),
    ("C-Level", 0),
];

/// Highest job level.
pub const MAX_JOB_LEVEL: u8 = 7;

pub fn months_to_promote(level: u8) -> u32 {
    JOB_LEVELS
        .get(usize::from(level))
        .map(|(_, months)| *months)
        .unwrap_or(0)
}

macro_rules! pos {
    ($title:expr, $salary:expr, $edu:ident, $iq:expr) => {
        pos!($title, $salary, $edu, $iq, [])
    };
    ($title:expr, $salary:expr, $edu:ident, $iq:expr, [$($deg:expr),*]) => {
        JobPosition {
            title: $title,
            base_salary: $salary,
            education_req: EducationReq::$edu,
            iq_req: $iq,
            required_degrees: &[$($deg),*],
        }
    };
}

const TECH: [JobPosition; 8] = [
    pos!("Entry Level Tech", 3500, None, 5),
    pos!("Junior Developer", 4500, None, 10, ["cs_bachelors", "cs_bootcamp"]),
    pos!("Mid-Level Developer", 6000, Bachelors, 20, ["cs_bachelors"]),
    pos!("Senior Developer", 8500, Bachelors, 35, ["cs_bachelors"]),
    pos!("Tech Manager", 12_000, Bachelors, 50, ["cs_masters", "mba"]),
    pos!("Tech Director", 18_000, Masters, 70, ["cs_masters", "mba"]),
    pos!("VP of Engineering", 28_000, Masters, 85, ["cs_masters", "mba"]),
    pos!("CTO", 50_000, Masters, 100, ["cs_masters", "mba"]),
];

const FINANCE: [JobPosition; 8] = [
    pos!("Entry Level Finance", 3200, None, 5),
    pos!("Junior Analyst", 4200, Bachelors, 10, ["finance_bachelors"]),
    pos!("Financial Analyst", 5800, Bachelors, 20, ["finance_bachelors"]),
    pos!("Senior Analyst", 8200, Bachelors, 35, ["finance_bachelors"]),
    pos!("Finance Manager", 11_500, Bachelors, 50, ["finance_masters", "mba"]),
    pos!("Finance Director", 17_000, Masters, 70, ["finance_masters", "mba"]),
    pos!("VP of Finance", 26_000, Masters, 85, ["finance_masters", "mba"]),
    pos!("CFO", 48_000, Masters, 100, ["finance_masters", "mba"]),
];

const HEALTHCARE: [JobPosition; 8] = [
    pos!("Entry Level Healthcare", 3000, None, 5),
    pos!("Junior Healthcare Worker", 4000, None, 10),
    pos!("Registered Nurse", 5500, Bachelors, 20, ["nursing_bachelors"]),
    pos!("Senior Nurse", 7800, Bachelors, 35, ["nursing_bachelors"]),
    pos!("Nurse Manager", 11_000, Bachelors, 50, ["nursing_bachelors"]),
    pos!("Healthcare Director", 16_000, Masters, 70, ["health_masters", "mba"]),
    pos!("VP of Healthcare", 24_000, Masters, 85, ["health_masters", "mba"]),
    pos!("Chief Medical Officer", 45_000, Masters, 100, ["health_masters", "mba"]),
];

const SALES: [JobPosition; 8] = [
    pos!("Entry Level Sales", 2800, None, 5),
    pos!("Junior Sales Rep", 3800, None, 10),
    pos!("Sales Representative", 5200, Bachelors, 20),
    pos!("Senior Sales Rep", 7500, Bachelors, 35),
    pos!("Sales Manager", 10_500, Bachelors, 50),
    pos!("Sales Director", 15_000, Masters, 70),
    pos!("VP of Sales", 22_000, Masters, 85),
    pos!("Chief Revenue Officer", 42_000, Masters, 100),
];

const EDUCATION_LADDER: [JobPosition; 8] = [
    pos!("Entry Level Education", 3000, None, 5),
    pos!("Teaching Assistant", 4000, None, 10),
    pos!("Teacher", 5400, Bachelors, 20),
    pos!("Senior Teacher", 7600, Bachelors, 35),
    pos!("Department Head", 10_800, Bachelors, 50),
    pos!("Principal", 15_500, Masters, 70),
    pos!("VP of Education", 23_000, Masters, 85),
    pos!("Superintendent", 44_000, Masters, 100),
];

const ENGINEERING: [JobPosition; 8] = [
    pos!("Entry Level Engineer", 3600, None, 5),
    pos!("Junior Engineer", 4600, None, 10),
    pos!("Engineer", 6200, Bachelors, 20),
    pos!("Senior Engineer", 8800, Bachelors, 35),
    pos!("Engineering Manager", 12_500, Bachelors, 50),
    pos!("Engineering Director", 18_500, Masters, 70),
    pos!("VP of Engineering", 29_000, Masters, 85),
    pos!("Chief Engineer", 52_000, Masters, 100),
];

const LAW: [JobPosition; 8] = [
    pos!("Entry Level Legal", 3400, None, 5),
    pos!("Legal Assistant", 4400, None, 10),
    pos!("Associate Attorney", 6000, Bachelors, 20),
    pos!("Senior Attorney", 8500, Bachelors, 35),
    pos!("Partner", 12_000, Bachelors, 50),
    pos!("Managing Partner", 17_500, Masters, 70),
    pos!("VP Legal", 27_000, Masters, 85),
    pos!("General Counsel", 49_000, Masters, 100),
];

const MARKETING: [JobPosition; 8] = [
    pos!("Entry Level Marketing", 3100, None, 5),
    pos!("Junior Marketer", 4100, None, 10),
    pos!("Marketing Specialist", 5600, Bachelors, 20),
    pos!("Senior Marketer", 8000, Bachelors, 35),
    pos!("Marketing Manager", 11_200, Bachelors, 50),
    pos!("Marketing Director", 16_500, Masters, 70),
    pos!("VP of Marketing", 25_000, Masters, 85),
    pos!("CMO", 46_000, Masters, 100),
];

impl JobField {
    pub const ALL: [JobField; 8] = [
        JobField::Tech,
        JobField::Finance,
        JobField::Healthcare,
        JobField::Sales,
        JobField::Education,
        JobField::Engineering,
        JobField::Law,
        JobField::Marketing,
    ];

    pub fn ladder(self) -> &'static [JobPosition; 8] {
        match self {
            JobField::Tech => &TECH,
            JobField::Finance => &FINANCE,
            JobField::Healthcare => &HEALTHCARE,
            JobField::Sales => &SALES,
            JobField::Education => &EDUCATION_LADDER,
            JobField::Engineering => &ENGINEERING,
            JobField::Law => &LAW,
            JobField::Marketing => &MARKETING,
        }
    }

    /// Position at `level`, or `None` above the top of the ladder.
    pub fn position(self, level: u8) -> Option<&'static JobPosition> {
        self.ladder().get(usize::from(level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_cycle_back_to_expansion() {
        let mut phase = EconomyPhase::Expansion;
        for _ in 0..4 {
            phase = phase.next();
        }
        assert_eq!(phase, EconomyPhase::Expansion);
    }

    #[test]
    fn phase_ranges_are_ordered() {
        for phase in EconomyPhase::ALL {
            let (min, max) = phase.params().duration;
            assert!(min < max, "{phase:?}");
        }
    }

    #[test]
    fn ladders_have_rising_salaries() {
        for field in JobField::ALL {
            let ladder = field.ladder();
            for pair in ladder.windows(2) {
                assert!(pair[0].base_salary < pair[1].base_salary, "{field:?}");
                assert!(pair[0].iq_req <= pair[1].iq_req, "{field:?}");
            }
        }
    }

    #[test]
    fn degree_prerequisites_exist() {
        for program in EDUCATION.iter() {
            for prereq in program.prerequisites {
                assert!(
                    EDUCATION.iter().any(|p| p.degree_id == Some(*prereq)),
                    "missing prerequisite {prereq}"
                );
            }
        }
        let mba = find_program("MBA Program").unwrap();
        assert!(mba.requires_any_bachelors);
        assert!(!mba.is_instant());
        assert!(find_program("Finance Books").unwrap().is_instant());
    }

    #[test]
    fn lookups_by_name() {
        assert_eq!(find_property("Duplex").unwrap().price, 150_000);
        assert_eq!(find_business("Laundromat").unwrap().base_income, 1200);
        assert_eq!(find_stock("Coca-Cola (KO)").unwrap().min_buy, 500);
        assert_eq!(find_crypto("Tether (USDT)").unwrap().yield_rate, 0.05);
        assert!(find_stock("Nope").is_none());
        assert_eq!(months_to_promote(0), 12);
        assert_eq!(months_to_promote(MAX_JOB_LEVEL), 0);
        assert!(JobField::Law.position(8).is_none());
    }
}
