//! Property tests for check-digit identifiers.

use dicebag::identifier::{check_digit, CNPJ_WEIGHTS_FIRST, CNPJ_WEIGHTS_SECOND};
use dicebag::{Cnpj, Cpf};
use proptest::prelude::*;

fn arb_cnpj_base() -> impl Strategy<Value = [u8; 8]> {
    prop::array::uniform8(0u8..10)
}

fn arb_cpf_base() -> impl Strategy<Value = [u8; 9]> {
    prop::array::uniform9(0u8..10)
}

proptest! {
    #[test]
    fn prop_cnpj_is_valid_and_keeps_base(base in arb_cnpj_base()) {
        let cnpj = Cnpj::from_base(&base).to_string();
        let prefix: String = base.iter().map(|d| char::from(b'0' + d)).collect();

        prop_assert_eq!(cnpj.len(), 14);
        prop_assert!(cnpj.starts_with(&prefix));
        prop_assert_eq!(&cnpj[8..12], "0001");
        prop_assert!(Cnpj::is_valid(&cnpj));
    }

    #[test]
    fn prop_cnpj_check_digits_are_pure(base in arb_cnpj_base()) {
        let first = Cnpj::from_base(&base);
        let second = Cnpj::from_base(&base);
        prop_assert_eq!(first.check_digits(), second.check_digits());
    }

    #[test]
    fn prop_cnpj_check_digits_match_weight_rule(base in arb_cnpj_base()) {
        let cnpj = Cnpj::from_base(&base);
        let digits = cnpj.digits();

        let first = check_digit(&digits[..12], &CNPJ_WEIGHTS_FIRST);
        let second = check_digit(&digits[..13], &CNPJ_WEIGHTS_SECOND);
        prop_assert_eq!(cnpj.check_digits(), (first, second));
        prop_assert!(first <= 9 && second <= 9);
    }

    #[test]
    fn prop_cnpj_check_digit_change_is_detected(
        base in arb_cnpj_base(),
        pos in 12usize..14,
        bump in 1u8..10,
    ) {
        let mut digits = *Cnpj::from_base(&base).digits();
        digits[pos] = (digits[pos] + bump) % 10;
        let tampered: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
        prop_assert!(!Cnpj::is_valid(&tampered));
    }

    #[test]
    fn prop_cpf_is_valid(base in arb_cpf_base()) {
        let cpf = Cpf::from_base(&base).to_string();
        prop_assert_eq!(cpf.len(), 11);
        prop_assert!(Cpf::is_valid(&cpf));
    }
}
