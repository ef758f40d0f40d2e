/// One entry of a rider's break diagnosis.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BreakCause {
    /// Index into the rider's bone table.
    Bone(usize),
    /// The rider came off the sled.
    SledDetached,
    /// The body came apart.
    BodyDetached,
}

impl BreakCause {
    pub const RAW_SLED_DETACHED: i32 = -1;
    pub const RAW_BODY_DETACHED: i32 = -2;

    /// Decodes the physics engine's signed form: non-negative values are bone
    /// indices, `-1` and `-2` are the detachment sentinels. Other negatives are
    /// not a known cause.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            Self::RAW_SLED_DETACHED => Some(BreakCause::SledDetached),
            Self::RAW_BODY_DETACHED => Some(BreakCause::BodyDetached),
            i if i >= 0 => Some(BreakCause::Bone(i as usize)),
            _ => None,
        }
    }

    #[inline]
    pub fn bone(self) -> Option<usize> {
        match self {
            BreakCause::Bone(i) => Some(i),
            _ => None,
        }
    }
}

/// Failed bones in causal order; the first entry is the primary cause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakDiagnosis {
    causes: Vec<BreakCause>,
}

impl BreakDiagnosis {
    pub fn new(causes: Vec<BreakCause>) -> Self {
        Self { causes }
    }

    /// Builds a diagnosis from raw signed entries, dropping unknown sentinels.
    pub fn from_raw(raw: &[i32]) -> Self {
        let causes = raw
            .iter()
            .filter_map(|&r| {
                let cause = BreakCause::from_raw(r);
                if cause.is_none() {
                    log::debug!("ignoring unknown break cause {r}");
                }
                cause
            })
            .collect();
        Self { causes }
    }

    #[inline]
    pub fn causes(&self) -> &[BreakCause] {
        &self.causes
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.causes.is_empty()
    }

    #[inline]
    pub fn primary(&self) -> Option<BreakCause> {
        self.causes.first().copied()
    }

    /// Causes after the primary one.
    #[inline]
    pub fn secondary(&self) -> &[BreakCause] {
        self.causes.get(1..).unwrap_or(&[])
    }

    #[inline]
    pub fn contains(&self, cause: BreakCause) -> bool {
        self.causes.contains(&cause)
    }
}
