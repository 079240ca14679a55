use proptest::prelude::*;
use stellar_codex::core::types::{EmpireId, ObjectId, PlanetEnvironment, PlanetSize, PlanetType};
use stellar_codex::effects::condition::{Condition, ScriptingContext};
use stellar_codex::effects::universe::{Empire, Universe, UniverseObject};

/// Content identifiers, plus text that collides with the condition syntax
fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z][A-Z0-9_]{0,15}",
        "[A-Za-z0-9 _()&|~,\"\\\\]{0,12}",
    ]
}

fn arb_leaf() -> impl Strategy<Value = Condition> {
    prop_oneof![
        Just(Condition::All),
        Just(Condition::None),
        Just(Condition::Source),
        Just(Condition::Planet),
        Just(Condition::Ship),
        Just(Condition::Building),
        Just(Condition::Unowned),
        Just(Condition::Capital),
        Just(Condition::OwnedBySourceOwner),
        arb_name().prop_map(Condition::Species),
        arb_name().prop_map(Condition::Focus),
        arb_name().prop_map(Condition::OwnerHasTech),
        arb_name().prop_map(Condition::OwnerHasPolicy),
        arb_name().prop_map(Condition::HasSpecial),
        prop::sample::select(PlanetSize::ALL.to_vec()).prop_map(Condition::PlanetSize),
        prop::sample::select(PlanetEnvironment::ALL.to_vec())
            .prop_map(Condition::PlanetEnvironment),
    ]
}

/// Arbitrary trees, including empty and single-part compounds
fn arb_condition() -> impl Strategy<Value = Condition> {
    arb_leaf().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Condition::And),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Condition::Or),
            inner.prop_map(|c| !c),
        ]
    })
}

/// Small universe with one object of each kind and a capital
fn universe() -> Universe {
    let mut universe = Universe::new();
    let mut empire = Empire::new(EmpireId(1), "Concord");
    empire.capital = Some(ObjectId(1));
    empire.techs.insert("PRO_GENERIC_SUPPLIES".to_string());
    empire.grant_policy_unchecked("PLC_LIBERTY", 1);
    universe.insert_empire(empire);
    universe.insert_object(
        UniverseObject::planet(ObjectId(1), PlanetType::Tundra, PlanetSize::Large)
            .with_owner(EmpireId(1))
            .with_species("SP_FULVER", 8.0)
            .with_focus("FOCUS_STOCKPILE")
            .with_special("GAIA_SPECIAL"),
    );
    universe.insert_object(UniverseObject::planet(
        ObjectId(2),
        PlanetType::GasGiant,
        PlanetSize::GasGiant,
    ));
    universe.insert_object(UniverseObject::ship(ObjectId(3)).with_owner(EmpireId(1)));
    universe.insert_object(UniverseObject::building(ObjectId(4)));
    universe
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_display_parse_round_trip(cond in arb_condition()) {
        let text = cond.to_string();
        let parsed: Condition = text.parse().unwrap();
        prop_assert_eq!(parsed, cond, "text: {}", text);
    }

    #[test]
    fn test_serde_round_trip(cond in arb_condition()) {
        let json = serde_json::to_string(&cond).unwrap();
        let parsed: Condition = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, cond);
    }

    #[test]
    fn test_operators_follow_boolean_logic(a in arb_condition(), b in arb_condition()) {
        let universe = universe();
        let ctx = ScriptingContext::new(&universe, Some(ObjectId(1)));
        for object in universe.objects() {
            let lhs = a.matches(&ctx, object);
            let rhs = b.matches(&ctx, object);
            prop_assert_eq!((a.clone() & b.clone()).matches(&ctx, object), lhs && rhs);
            prop_assert_eq!((a.clone() | b.clone()).matches(&ctx, object), lhs || rhs);
            prop_assert_eq!((!a.clone()).matches(&ctx, object), !lhs);
        }
    }

    #[test]
    fn test_select_agrees_with_matches(cond in arb_condition()) {
        let universe = universe();
        let ctx = ScriptingContext::new(&universe, Some(ObjectId(3)));
        let selected: Vec<ObjectId> = cond.select(&ctx).into_iter().map(|o| o.id).collect();
        let expected: Vec<ObjectId> = universe
            .objects()
            .filter(|o| cond.matches(&ctx, o))
            .map(|o| o.id)
            .collect();
        prop_assert_eq!(selected, expected);
    }
}
