use realty_core::models::PropertyType;

/// Keyword rules, checked in order; the first rule with a matching keyword wins
const RULES: &[(&[&str], PropertyType)] = &[
    (&["terreno", "lote"], PropertyType::Land),
    (&["apartamento", "cobertura", "duplex", "flat", "kitnet"], PropertyType::Apartment),
    (&["casa", "sobrado", "vila"], PropertyType::House),
    (
        &["comercial", "loja", "box", "galpão", "deposito", "depósito", "sala", "conjunto"],
        PropertyType::Commercial,
    ),
    (&["prédio", "edificio", "edifício"], PropertyType::Building),
];

/// Map listing free text to a property-type category by lower-cased substring match.
///
/// Missing or unmatched text falls through to [`PropertyType::Other`].
pub fn classify_property_type(text: Option<&str>) -> PropertyType {
    let Some(text) = text else {
        return PropertyType::Other;
    };
    let lowered = text.to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map_or(PropertyType::Other, |(_, ty)| *ty)
}
