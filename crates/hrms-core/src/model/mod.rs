// ── Domain model ──

pub mod employee;
pub mod roster;

pub use employee::Employee;
pub use roster::Roster;

#[cfg(test)]
pub(crate) mod test_support {
    use super::Employee;

    pub(crate) fn employee(id: &str, name: &str, department: &str) -> Employee {
        Employee {
            employee_id: id.into(),
            full_name: name.into(),
            email: format!("{}@example.com", id.to_lowercase()),
            department: department.into(),
        }
    }
}
