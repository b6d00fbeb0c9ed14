use slotmap::new_key_type;

new_key_type! {
    /// Identifies a placed building in the registry.
    ///
    /// Keys stay valid until the building is removed; a removed key never
    /// aliases a later building.
    pub struct BuildingId;
}
