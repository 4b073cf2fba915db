use crate::fixtures::PoolParamsBuilder;
use lendsafe_core::domain::{validate_pool_params, validate_signature_bytes};
use lendsafe_core::foundation::{ErrorKind, LendsafeError};

#[test]
fn free_text_is_sanitized_before_length_checks() {
    let params = PoolParamsBuilder::default().name("  Harvest\t<script>Pool</script>  ").build();
    let validated = validate_pool_params(&params).expect("valid params");
    assert_eq!(validated.name, "Harvest scriptPool/script");
}

#[test]
fn range_violations_are_validation_errors() {
    for params in [
        PoolParamsBuilder::default().interest_rate_bps(10_001).build(),
        PoolParamsBuilder::default().loan_amounts(0, 10).build(),
        PoolParamsBuilder::default().loan_amounts(50, 10).build(),
        PoolParamsBuilder::default().name("ab").build(),
        PoolParamsBuilder::default().name("x".repeat(65)).build(),
    ] {
        let err = validate_pool_params(&params).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation, "{err}");
    }
}

#[test]
fn signature_must_be_65_bytes() {
    assert!(matches!(validate_signature_bytes(&[1u8; 64]), Err(LendsafeError::InvalidSignature { .. })));
    assert!(matches!(validate_signature_bytes(&[1u8; 66]), Err(LendsafeError::InvalidSignature { .. })));
    assert_eq!(validate_signature_bytes(&[1u8; 65]).expect("valid").len(), 65);
}
