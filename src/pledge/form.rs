use crate::foundation::error::{PatchError, PatchResult};

/// Category of pledger; selects the extra form fields and the token formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pathway {
    /// A single person.
    Individual,
    /// A household pledging together.
    Family,
    /// A school class.
    School,
    /// A business or other organisation.
    Organisation,
    /// A community group.
    Community,
    /// Anything else.
    Other,
}

impl Pathway {
    /// All pathways in form order.
    pub const ALL: [Pathway; 6] = [
        Self::Individual,
        Self::Family,
        Self::School,
        Self::Organisation,
        Self::Community,
        Self::Other,
    ];

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Family => "family",
            Self::School => "school",
            Self::Organisation => "organisation",
            Self::Community => "community",
            Self::Other => "other",
        }
    }

    /// Parse a wire name, case-insensitively.
    pub fn parse(s: &str) -> PatchResult<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| PatchError::validation(format!("unknown pathway '{s}'")))
    }

    /// Pledges a form on this pathway may select.
    pub fn pledge_options(self) -> &'static [&'static str] {
        match self {
            Self::Individual | Self::Family => &HOUSEHOLD_PLEDGES,
            Self::School | Self::Organisation | Self::Community | Self::Other => &GROUP_PLEDGES,
        }
    }
}

/// Pledges offered to individuals and families.
pub const HOUSEHOLD_PLEDGES: [&str; 5] = [
    "Add another veg to our dinner",
    "Add a veg to Lunch",
    "Try new Veg",
    "Eat larger quantity",
    "Try an old veg I didn't use to like",
];

/// Pledges offered to schools, organisations, community groups and other pledgers.
pub const GROUP_PLEDGES: [&str; 5] = ["Option 1", "Option 2", "Option 3", "Option 4", "Option 5"];

/// Organisation types offered by the organisation pathway.
pub const ORG_TYPES: [&str; 6] = [
    "Business",
    "Non-profit",
    "Government",
    "Healthcare",
    "Education",
    "Other",
];

/// Submitted pledge fields. Pathway-specific fields are optional at the type level and checked by
/// [`PledgeForm::validate`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PledgeForm {
    /// Pledger name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Selected pledge, one of [`Pathway::pledge_options`].
    pub pledge: String,
    /// Pledger category.
    #[serde(rename = "user_type")]
    pub pathway: Pathway,
    /// Newsletter consent.
    #[serde(default, rename = "newsletter_opt_in")]
    pub newsletter: bool,
    /// Family members taking part.
    #[serde(default)]
    pub participants_count: Option<u32>,
    /// School name.
    #[serde(default)]
    pub school_name: Option<String>,
    /// Class or year group.
    #[serde(default)]
    pub class_name: Option<String>,
    /// Students in the class.
    #[serde(default)]
    pub class_size: Option<u32>,
    /// Organisation name.
    #[serde(default)]
    pub org_name: Option<String>,
    /// One of [`ORG_TYPES`].
    #[serde(default)]
    pub org_type: Option<String>,
    /// Participants in the organisation.
    #[serde(default)]
    pub org_size: Option<u32>,
    /// Community group name.
    #[serde(default)]
    pub group_name: Option<String>,
    /// Community group size.
    #[serde(default)]
    pub group_size: Option<u32>,
}

impl PledgeForm {
    /// A form with only the common fields filled in.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        pledge: impl Into<String>,
        pathway: Pathway,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            pledge: pledge.into(),
            pathway,
            newsletter: false,
            participants_count: None,
            school_name: None,
            class_name: None,
            class_size: None,
            org_name: None,
            org_type: None,
            org_size: None,
            group_name: None,
            group_size: None,
        }
    }

    /// Check the common fields, the pledge choice, and the pathway's required fields and numeric
    /// ranges.
    pub fn validate(&self) -> PatchResult<()> {
        require_text("name", Some(&self.name))?;
        require_text("email", Some(&self.email))?;
        if !self.email.contains('@') {
            return Err(PatchError::validation("email must contain '@'"));
        }
        let pledge = require_text("pledge", Some(&self.pledge))?;
        let options = self.pathway.pledge_options();
        if !options.contains(&pledge) {
            return Err(PatchError::validation(format!(
                "pledge '{pledge}' is not offered to the {} pathway",
                self.pathway.as_str()
            )));
        }

        match self.pathway {
            Pathway::Individual | Pathway::Other => Ok(()),
            Pathway::Family => require_range("participants_count", self.participants_count, 1, 20),
            Pathway::School => {
                require_text("school_name", self.school_name.as_deref())?;
                require_text("class_name", self.class_name.as_deref())?;
                require_range("class_size", self.class_size, 1, 100)
            }
            Pathway::Organisation => {
                require_text("org_name", self.org_name.as_deref())?;
                let org_type = require_text("org_type", self.org_type.as_deref())?;
                if !ORG_TYPES.iter().any(|t| *t == org_type) {
                    return Err(PatchError::validation(format!(
                        "org_type '{org_type}' is not one of {ORG_TYPES:?}"
                    )));
                }
                optional_range("org_size", self.org_size, 1, 1000)
            }
            Pathway::Community => {
                require_text("group_name", self.group_name.as_deref())?;
                require_range("group_size", self.group_size, 1, 100)
            }
        }
    }

    /// Client-side token estimate used when the submission backend is unavailable.
    pub fn estimate_tokens(&self) -> u64 {
        let n = |v: Option<u32>, default: u32| u64::from(v.filter(|&x| x > 0).unwrap_or(default));
        match self.pathway {
            Pathway::Individual | Pathway::Other => 1,
            Pathway::Family => n(self.participants_count, 1),
            Pathway::School => n(self.class_size, 30),
            Pathway::Organisation => n(self.org_size, 10).min(100),
            Pathway::Community => n(self.group_size, 5),
        }
    }
}

fn require_text<'a>(field: &str, v: Option<&'a str>) -> PatchResult<&'a str> {
    match v.map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(PatchError::validation(format!("{field} is required"))),
    }
}

fn require_range(field: &str, v: Option<u32>, min: u32, max: u32) -> PatchResult<()> {
    let v = v.ok_or_else(|| PatchError::validation(format!("{field} is required")))?;
    check_range(field, v, min, max)
}

fn optional_range(field: &str, v: Option<u32>, min: u32, max: u32) -> PatchResult<()> {
    match v {
        Some(v) => check_range(field, v, min, max),
        None => Ok(()),
    }
}

fn check_range(field: &str, v: u32, min: u32, max: u32) -> PatchResult<()> {
    if !(min..=max).contains(&v) {
        return Err(PatchError::validation(format!(
            "{field} must be within {min}..={max}, got {v}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/pledge/form.rs"]
mod tests;
