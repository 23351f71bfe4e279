use dataverse_schema::kinds::AttributeKind;
use dataverse_schema::{Attribute, AttributeOption, Ontology, OntologyClass, OptionValue};
use proptest::prelude::*;
use serde_json::json;

fn any_attribute_kind() -> impl Strategy<Value = AttributeKind> {
    prop_oneof![
        Just(AttributeKind::Boolean),
        Just(AttributeKind::Option),
        Just(AttributeKind::Number),
        Just(AttributeKind::Text),
    ]
}

proptest! {
    #[test]
    fn well_formed_colors_are_accepted(color in "#[0-9A-Za-z]{6}") {
        let class = OntologyClass::new("car", color.clone(), 1).unwrap();
        prop_assert_eq!(class.color(), color.as_str());
    }

    #[test]
    fn color_without_hash_is_rejected(body in "[0-9A-Za-z]{6}") {
        let err = OntologyClass::new("car", body, 1).unwrap_err();
        prop_assert_eq!(err.field(), "color");
    }

    #[test]
    fn color_of_wrong_length_is_rejected(body in "[0-9A-Za-z]{0,5}|[0-9A-Za-z]{7,10}") {
        let color = format!("#{body}");
        prop_assert!(OntologyClass::new("car", color, 1).is_err());
    }

    #[test]
    fn color_with_other_characters_is_rejected(
        prefix in "[0-9A-Za-z]{0,5}",
        odd in "[^0-9A-Za-z]",
    ) {
        let mut body = prefix;
        body.push_str(&odd);
        while body.chars().count() < 6 {
            body.push('0');
        }
        let color = format!("#{body}");
        prop_assert!(OntologyClass::new("car", color, 1).is_err());
    }

    #[test]
    fn options_are_required_only_for_option_attributes(
        kind in any_attribute_kind(),
        values in proptest::collection::vec("[a-z]{1,8}", 0..4),
    ) {
        let options = values
            .iter()
            .map(|value| AttributeOption::new(value.as_str()).unwrap())
            .collect::<Vec<_>>();
        let has_options = !options.is_empty();

        let result = Attribute::new("attr", kind, Some(options));
        prop_assert_eq!(result.is_ok(), kind != AttributeKind::Option || has_options);

        let absent = Attribute::new("attr", kind, None);
        prop_assert_eq!(absent.is_ok(), kind != AttributeKind::Option);
    }

    #[test]
    fn integers_in_text_resolve_to_integers(integer in any::<i64>()) {
        prop_assert_eq!(OptionValue::parse(&integer.to_string()), OptionValue::Integer(integer));
    }

    #[test]
    fn letters_in_text_stay_text(text in "[g-z]{2,12}") {
        prop_assert_eq!(OptionValue::parse(&text), OptionValue::Text(text.clone()));
    }
}

#[test]
fn reference_colors() {
    assert!(OntologyClass::new("car", "#AABBCC", 1).is_ok());
    assert!(OntologyClass::new("car", "AABBCC", 1).is_err());
    assert!(OntologyClass::new("car", "#ABC", 1).is_err());
}

#[test]
fn invalid_class_fails_the_whole_ontology() {
    let err = Ontology::try_from(json!({
        "name": "traffic",
        "image_type": "polygon",
        "classes": [
            { "name": "car", "color": "#FF0000", "rank": 1 },
            { "name": "bus", "color": "#00FF00", "rank": 2 },
            { "name": "tram", "color": "#00FF", "rank": 3 }
        ]
    }))
    .unwrap_err();

    assert_eq!(err.field(), "classes[2].color");
    assert!(err.message().contains("tram"));
    assert!(err.message().contains("#00FF"));
}
