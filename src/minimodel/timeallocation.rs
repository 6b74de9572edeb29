//! Awarded and charged time for programs.

use qtty::Seconds;

/// Program band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Band {
    Band1 = 1,
    Band2 = 2,
    Band3 = 3,
    Band4 = 4,
}

/// Partner or internal category that time is accounted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeAccountingCode {
    AR,
    AU,
    BR,
    CA,
    CFH,
    CL,
    KR,
    DD,
    DS,
    GS,
    GT,
    JP,
    LP,
    LTP,
    SV,
    UH,
    UK,
    US,
    XCHK,
}

impl TimeAccountingCode {
    pub fn description(self) -> &'static str {
        use TimeAccountingCode::*;
        match self {
            AR => "Argentina",
            AU => "Australia",
            BR => "Brazil",
            CA => "Canada",
            CFH => "CFHT Exchange",
            CL => "Chile",
            KR => "Republic of Korea",
            DD => "Director's Time",
            DS => "Demo Science",
            GS => "Gemini Staff",
            GT => "Guaranteed Time",
            JP => "Subaru",
            LP => "Large Program",
            LTP => "Limited-term Participant",
            SV => "System Verification",
            UH => "University of Hawaii",
            UK => "United Kingdom",
            US => "United States",
            XCHK => "Keck Exchange",
        }
    }
}

/// Time awarded to a program by one category.
///
/// A program holds at most one allocation per category; see
/// [`Program::new`](super::Program::new).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeAllocation {
    pub category: TimeAccountingCode,
    pub program_awarded: Seconds,
    pub partner_awarded: Seconds,
    pub band: Option<Band>,
}

impl TimeAllocation {
    pub fn new(category: TimeAccountingCode, program_awarded: Seconds, partner_awarded: Seconds) -> Self {
        Self {
            category,
            program_awarded,
            partner_awarded,
            band: None,
        }
    }

    pub fn with_band(mut self, band: Band) -> Self {
        self.band = Some(band);
        self
    }

    pub fn total_awarded(&self) -> Seconds {
        self.program_awarded + self.partner_awarded
    }
}

/// Time charged to a program, tracked independently of its atoms.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeUsed {
    pub program_used: Seconds,
    pub partner_used: Seconds,
    pub not_charged: Seconds,
}

impl TimeUsed {
    pub fn new(program_used: Seconds, partner_used: Seconds, not_charged: Seconds) -> Self {
        Self {
            program_used,
            partner_used,
            not_charged,
        }
    }

    pub fn total_used(&self) -> Seconds {
        self.program_used + self.partner_used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_awarded_adds_program_and_partner() {
        let alloc = TimeAllocation::new(TimeAccountingCode::US, Seconds::new(3600.0), Seconds::new(600.0))
            .with_band(Band::Band2);
        assert_eq!(alloc.total_awarded().value(), 4200.0);
        assert_eq!(alloc.band, Some(Band::Band2));
    }

    #[test]
    fn total_used_ignores_not_charged() {
        let used = TimeUsed::new(Seconds::new(100.0), Seconds::new(20.0), Seconds::new(5.0));
        assert_eq!(used.total_used().value(), 120.0);
    }

    #[test]
    fn codes_describe_themselves() {
        assert_eq!(TimeAccountingCode::UH.description(), "University of Hawaii");
        assert_eq!(TimeAccountingCode::DD.description(), "Director's Time");
    }
}
