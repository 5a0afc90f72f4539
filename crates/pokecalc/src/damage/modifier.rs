//! Named 4096-scale modifier values.

/// A fixed-point damage modifier (4096 = 1.0x).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Modifier(pub u32);

impl Modifier {
    /// 1.0x.
    pub const ONE: Self = Self(4096);
    /// 0.5x.
    pub const HALF: Self = Self(2048);
    /// 0.75x (Filter / Solid Rock / spread moves / Friend Guard).
    pub const THREE_QUARTERS: Self = Self(3072);
    /// 2.0x.
    pub const DOUBLE: Self = Self(8192);
    /// 1.5x.
    pub const ONE_POINT_FIVE: Self = Self(6144);
    /// 1.2x (Expert Belt, type-boost items).
    pub const ONE_POINT_TWO: Self = Self(4915);
    /// 1.3x (Sheer Force, Tough Claws, Sand Force, Gen 8+ terrain).
    /// Life Orb uses 5324, one less; the two are not interchangeable.
    pub const ONE_POINT_THREE: Self = Self(5325);
    /// Life Orb (5324/4096, slightly under 1.3x).
    pub const LIFE_ORB: Self = Self(5324);
    /// 1.1x (Muscle Band, Wise Glasses).
    pub const ONE_POINT_ONE: Self = Self(4505);
    /// Screens in doubles (2/3).
    pub const SCREEN_DOUBLES: Self = Self(2732);

    pub const fn value(self) -> u32 {
        self.0
    }
}
