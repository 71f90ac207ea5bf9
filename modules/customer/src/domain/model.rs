use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Customer(id = {} , firstName = {} , lastName = {} )",
            self.id, self.first_name, self.last_name
        )
    }
}

/// Customer before it has an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
}

impl NewCustomer {
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_log_format() {
        let c = Customer {
            id: 1,
            first_name: "Jack".to_owned(),
            last_name: "Bauer".to_owned(),
        };
        assert_eq!(
            c.to_string(),
            "Customer(id = 1 , firstName = Jack , lastName = Bauer )"
        );
    }
}
