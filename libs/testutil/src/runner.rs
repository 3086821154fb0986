use crypt::{hash, verify, SaltSpec};

use crate::suite::{Suite, Vector};

pub fn run(suite: Suite) {
    for vector in suite.vectors {
        check_vector(&vector);
    }
}

fn check_vector(vector: &Vector) {
    let spec: SaltSpec = vector.salt.parse().unwrap();
    let encoded = hash(vector.scheme, &vector.password, Some(&spec)).unwrap();
    assert_eq!(
        encoded, vector.expected,
        "{} password {:?} salt {:?}",
        vector.scheme, vector.password, vector.salt
    );

    let wrong = format!("{}x", vector.password);
    for candidate in std::iter::once(&vector.expected).chain(&vector.aliases) {
        assert!(verify(candidate, &vector.password), "{}", candidate);
        assert!(!verify(candidate, &wrong), "{}", candidate);
    }
}
