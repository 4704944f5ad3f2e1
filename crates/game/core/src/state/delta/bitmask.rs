use bitflags::bitflags;

bitflags! {
    /// Tracks which fields of an [`Item`](crate::state::Item) changed during a transition.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ItemFields: u8 {
        const STATE     = 1 << 0;
        const PLACEMENT = 1 << 1;
    }
}

bitflags! {
    /// Tracks which fields of a [`Container`](crate::state::Container) changed during a transition.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ContainerFields: u8 {
        const CONTENTS    = 1 << 0;
        const EQUIPPED_BY = 1 << 1;
        const POSITION    = 1 << 2;
    }
}

bitflags! {
    /// Tracks which fields of a [`Carrier`](crate::state::Carrier) changed during a transition.
    ///
    /// The debounce clock is bookkeeping and has no bit.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CarrierFields: u8 {
        const POSE          = 1 << 0;
        const HAND          = 1 << 1;
        const CONTAINER     = 1 << 2;
        const DROPPED_STACK = 1 << 3;
    }
}
