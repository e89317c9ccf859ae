use regex::Regex;
use std::sync::LazyLock;

static NUMBERED_CATEGORY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([PBMCJS])(\d+)$").expect("valid category pattern"));

const UNKNOWN_LABEL: &str = "Non renseigné";

fn base_label(code: &str) -> Option<&'static str> {
    let label = match code {
        "S" => "Sénior",
        "V" => "Vétéran",
        "V35" => "Vétéran 35",
        "V40" => "Vétéran 40",
        "V45" => "Vétéran 45",
        "V50" => "Vétéran 50",
        "V55" => "Vétéran 55",
        "V60" => "Vétéran 60",
        "V65" => "Vétéran 65",
        "V70" => "Vétéran 70",
        "V75" => "Vétéran 75",
        "P" => "Poussin",
        "P1" => "Poussin 1",
        "P2" => "Poussin 2",
        "B" => "Benjamin",
        "B1" => "Benjamin 1",
        "B2" => "Benjamin 2",
        "M" => "Minime",
        "M1" => "Minime 1",
        "M2" => "Minime 2",
        "C" => "Cadet",
        "C1" => "Cadet 1",
        "C2" => "Cadet 2",
        "J" => "Junior",
        "J1" => "Junior 1",
        "J2" => "Junior 2",
        "J3" => "Junior 3",
        _ => return None,
    };
    Some(label)
}

/// Decode a federation category code (`V45`, `B2`, `S`...) to its French label
///
/// Unknown codes are returned unchanged.
pub fn decode_category(code: &str) -> String {
    if code.is_empty() {
        return UNKNOWN_LABEL.to_string();
    }

    if let Some(label) = base_label(code) {
        return label.to_string();
    }

    if let Some(age) = code.strip_prefix('V') {
        if !age.is_empty() && age.chars().all(|c| c.is_ascii_digit()) {
            return format!("Vétéran {}", age);
        }
    }

    if let Some(captures) = NUMBERED_CATEGORY.captures(code) {
        if let Some(base) = base_label(&captures[1]) {
            return format!("{} {}", base, &captures[2]);
        }
    }

    code.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Youth,
    Senior,
    Veteran,
    Unknown,
}

impl CategoryKind {
    pub fn of(code: &str) -> Self {
        match first_letter(code) {
            Some('P' | 'B' | 'M' | 'C' | 'J') => Self::Youth,
            Some('S') => Self::Senior,
            Some('V') => Self::Veteran,
            _ => Self::Unknown,
        }
    }
}

/// Split used for filtering: up to cadets are juniors, federation juniors are adults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeGroup {
    Junior,
    Adult,
    Unknown,
}

impl AgeGroup {
    pub fn of(code: &str) -> Self {
        match first_letter(code) {
            Some('P' | 'B' | 'M' | 'C') => Self::Junior,
            Some('J' | 'S' | 'V') => Self::Adult,
            _ => Self::Unknown,
        }
    }
}

fn first_letter(code: &str) -> Option<char> {
    code.chars().next().map(|c| c.to_ascii_uppercase())
}
