//! Validation and revision rules for shelter records.

use super::*;
use chrono::{Duration, TimeZone};
use rstest::{fixture, rstest};

#[fixture]
fn fields() -> ShelterFields {
    ShelterFields {
        name: "Central Library".to_owned(),
        address: "1 Library Road".to_owned(),
        latitude: 37.5665,
        longitude: 126.978,
        capacity: 250,
        shelter_type: Some("public building".to_owned()),
        contact: Some("02-123-4567".to_owned()),
    }
}

#[fixture]
fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[rstest]
fn valid_fields_produce_a_draft(fields: ShelterFields) {
    let draft = ShelterDraft::try_from(fields).expect("valid draft");
    assert_eq!(draft.name(), "Central Library");
    assert_eq!(draft.capacity(), 250);
    assert_eq!(draft.shelter_type(), Some("public building"));
}

#[rstest]
#[case::blank_name(|f: &mut ShelterFields| f.name = "   ".into(), "name", "blank")]
#[case::long_name(|f: &mut ShelterFields| f.name = "n".repeat(NAME_MAX + 1), "name", "too_long")]
#[case::blank_address(|f: &mut ShelterFields| f.address = String::new(), "address", "blank")]
#[case::long_address(|f: &mut ShelterFields| f.address = "a".repeat(ADDRESS_MAX + 1), "address", "too_long")]
#[case::long_type(|f: &mut ShelterFields| f.shelter_type = Some("t".repeat(TYPE_MAX + 1)), "type", "too_long")]
#[case::long_contact(|f: &mut ShelterFields| f.contact = Some("0".repeat(CONTACT_MAX + 1)), "contact", "too_long")]
#[case::latitude(|f: &mut ShelterFields| f.latitude = 91.0, "latitude", "out_of_range")]
#[case::longitude(|f: &mut ShelterFields| f.longitude = f64::NAN, "longitude", "out_of_range")]
#[case::capacity(|f: &mut ShelterFields| f.capacity = CAPACITY_MAX + 1, "capacity", "too_large")]
fn invalid_fields_are_rejected(
    mut fields: ShelterFields,
    #[case] mutate: fn(&mut ShelterFields),
    #[case] field: &str,
    #[case] code: &str,
) {
    mutate(&mut fields);
    let err = ShelterDraft::try_from(fields).expect_err("invalid draft");
    assert_eq!(err.field(), field);
    assert_eq!(err.code(), code);
}

#[rstest]
fn blank_optional_fields_normalise_to_none(mut fields: ShelterFields) {
    fields.shelter_type = Some("  ".into());
    fields.contact = Some(String::new());
    let draft = ShelterDraft::try_from(fields).expect("valid draft");
    assert_eq!(draft.shelter_type(), None);
    assert_eq!(draft.contact(), None);
}

#[rstest]
fn name_is_trimmed(mut fields: ShelterFields) {
    fields.name = "  Gym  ".into();
    let draft = ShelterDraft::try_from(fields).expect("valid draft");
    assert_eq!(draft.name(), "Gym");
}

#[rstest]
fn patch_changes_only_supplied_fields(fields: ShelterFields) {
    let draft = ShelterDraft::try_from(fields).expect("valid draft");
    let patch = ShelterPatch {
        capacity: Some(300),
        ..ShelterPatch::default()
    };

    let patched = patch.apply(&draft).expect("valid patch");

    assert_eq!(patched.capacity(), 300);
    assert_eq!(patched.name(), draft.name());
    assert_eq!(patched.location(), draft.location());
    assert_eq!(patched.contact(), draft.contact());
}

#[rstest]
fn patch_clears_optional_fields_with_empty_string(fields: ShelterFields) {
    let draft = ShelterDraft::try_from(fields).expect("valid draft");
    let patch = ShelterPatch {
        contact: Some(String::new()),
        ..ShelterPatch::default()
    };

    let patched = patch.apply(&draft).expect("valid patch");
    assert_eq!(patched.contact(), None);
    assert_eq!(patched.shelter_type(), draft.shelter_type());
}

#[rstest]
fn patch_result_is_revalidated(fields: ShelterFields) {
    let draft = ShelterDraft::try_from(fields).expect("valid draft");
    let patch = ShelterPatch {
        name: Some(" ".into()),
        ..ShelterPatch::default()
    };
    let err = patch.apply(&draft).expect_err("blank name");
    assert_eq!(err.field(), "name");
}

#[rstest]
fn capacity_limit_is_inclusive(mut fields: ShelterFields) {
    fields.capacity = CAPACITY_MAX;
    let draft = ShelterDraft::try_from(fields).expect("valid draft");
    assert_eq!(draft.capacity(), CAPACITY_MAX);
}

#[rstest]
fn patch_rejects_oversized_capacity(fields: ShelterFields) {
    let draft = ShelterDraft::try_from(fields).expect("valid draft");
    let patch = ShelterPatch {
        capacity: Some(u32::MAX),
        ..ShelterPatch::default()
    };

    let err = patch.apply(&draft).expect_err("oversized capacity");
    assert_eq!(err, ShelterValidationError::CapacityTooLarge { max: CAPACITY_MAX });
    assert_eq!(err.code(), "too_large");
}

#[rstest]
fn revise_preserves_created_at_and_advances_updated_at(
    fields: ShelterFields,
    epoch: DateTime<Utc>,
) {
    let draft = ShelterDraft::try_from(fields).expect("valid draft");
    let shelter = Shelter::create(draft.clone(), epoch);
    let later = epoch + Duration::minutes(5);

    let revised = shelter.clone().revise(draft, later);

    assert_eq!(revised.id(), shelter.id());
    assert_eq!(revised.created_at(), epoch);
    assert_eq!(revised.updated_at(), later);
}

#[rstest]
fn revise_never_moves_updated_at_backwards(fields: ShelterFields, epoch: DateTime<Utc>) {
    let draft = ShelterDraft::try_from(fields).expect("valid draft");
    let shelter = Shelter::create(draft.clone(), epoch);

    let revised = shelter.revise(draft, epoch - Duration::hours(1));

    assert_eq!(revised.updated_at(), epoch);
}
