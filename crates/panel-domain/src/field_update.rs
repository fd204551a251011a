use serde::{Serialize, Serializer};

/// Three-state field edit for partial update payloads.
///
/// `Option<T>` cannot distinguish "leave the field alone" from "blank it out",
/// so patch types carry `FieldUpdate<T>` instead:
/// - `NoChange` leaves the stored value untouched
/// - `Set(value)` replaces it
/// - `Clear` resets it to `None`
///
/// The server applies update payloads with omitted-means-untouched semantics,
/// so the three states map onto the wire as omitted / value / `null`. Embed a
/// `FieldUpdate` field with
/// `#[serde(skip_serializing_if = "FieldUpdate::is_no_change")]` so `NoChange`
/// never reaches the payload.
///
/// # Example
///
/// ```
/// use panel_domain::FieldUpdate;
///
/// let title_update = FieldUpdate::Set("Router Admin".to_string());
/// let icon_update: FieldUpdate<String> = FieldUpdate::Clear;
/// let group_update: FieldUpdate<i64> = FieldUpdate::NoChange;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Leave the field as it is
    NoChange,
    /// Replace the field with the given value
    Set(T),
    /// Reset the field to `None`
    Clear,
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::NoChange
    }
}

impl<T> FieldUpdate<T> {
    /// Fold this edit into an optional field in place.
    ///
    /// # Example
    ///
    /// ```
    /// use panel_domain::FieldUpdate;
    ///
    /// let mut icon = Some("mdi:router".to_string());
    /// FieldUpdate::Set("mdi:server".to_string()).apply_to(&mut icon);
    /// assert_eq!(icon, Some("mdi:server".to_string()));
    ///
    /// FieldUpdate::Clear.apply_to(&mut icon);
    /// assert_eq!(icon, None);
    /// ```
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = Some(value),
            FieldUpdate::Clear => *field = None,
        }
    }

    /// True for `Set` and `Clear`, false for `NoChange`.
    pub fn is_change(&self) -> bool {
        !matches!(self, FieldUpdate::NoChange)
    }

    /// For `#[serde(skip_serializing_if)]` on payload fields.
    pub fn is_no_change(&self) -> bool {
        matches!(self, FieldUpdate::NoChange)
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    /// Maps `Some(value)` to `Set(value)` and `None` to `Clear`. Useful at the
    /// CLI boundary where a parsed flag is already an `Option`.
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        }
    }
}

impl<T: Serialize> Serialize for FieldUpdate<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldUpdate::Set(value) => value.serialize(serializer),
            // NoChange is skipped at the field site via is_no_change.
            FieldUpdate::NoChange | FieldUpdate::Clear => serializer.serialize_none(),
        }
    }
}
