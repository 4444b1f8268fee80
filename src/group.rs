use crate::{errors::PeopleError, models::Person};
use anyhow::Result;

/// A labelled, directed link between two people of the same group.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Relation {
    from: usize,
    to: usize,
    label: String,
}

/// The loaded set of people. Relations refer to people by index.
#[derive(Debug, Clone, Default)]
pub struct Group {
    people: Vec<Person>,
    relations: Vec<Relation>,
}

impl Group {
    pub fn new(people: Vec<Person>) -> Self {
        Group {
            people,
            relations: Vec::new(),
        }
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Person> {
        self.people.get_mut(index)
    }

    /// Returns the first person whose id matches.
    pub fn find_by_id(&self, id: &str) -> Result<&Person, PeopleError> {
        self.people
            .iter()
            .find(|person| person.id() == id)
            .ok_or(PeopleError::UnknownId)
    }

    /// Relates two people in both directions.
    ///
    /// # Arguments
    /// * `person` - Index of the person the relation starts from.
    /// * `other` - Index of the related person.
    /// * `relation` - Label of `person -> other`.
    /// * `relation_back` - Label of `other -> person`, `relation` when absent.
    ///
    /// # Returns
    /// A Result indicating success or failure.
    pub fn relate(
        &mut self,
        person: usize,
        other: usize,
        relation: &str,
        relation_back: Option<&str>,
    ) -> Result<()> {
        if person >= self.people.len() || other >= self.people.len() {
            return Err(PeopleError::UnknownId)?;
        }

        self.relations.push(Relation {
            from: person,
            to: other,
            label: relation.to_string(),
        });
        self.relations.push(Relation {
            from: other,
            to: person,
            label: relation_back.unwrap_or(relation).to_string(),
        });
        Ok(())
    }

    /// Iterates the people related to `person` in the order the relations were made.
    pub fn relations_of(&self, person: usize) -> impl Iterator<Item = (&Person, &str)> {
        self.relations
            .iter()
            .filter(move |relation| relation.from == person)
            .map(move |relation| (&self.people[relation.to], relation.label.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> Group {
        Group::new(vec![
            Person::new("1", "Alice", 30, 60),
            Person::new("2", "Bob", 25, 80),
            Person::new("3", "Carol", 40, 70),
        ])
    }

    #[test]
    fn test_find_by_id_returns_exact_person() -> Result<()> {
        let group = group();
        let person = group.find_by_id("2")?;
        assert_eq!(person, &Person::new("2", "Bob", 25, 80));
        Ok(())
    }

    #[test]
    fn test_find_by_id_unknown() {
        assert!(matches!(group().find_by_id("9"), Err(PeopleError::UnknownId)));
    }

    #[test]
    fn test_find_by_id_returns_first_duplicate() -> Result<()> {
        let group = Group::new(vec![
            Person::new("1", "Alice", 30, 60),
            Person::new("1", "Impostor", 99, 99),
        ]);
        assert_eq!(group.find_by_id("1")?.name(), "Alice");
        Ok(())
    }

    #[test]
    fn test_relate_links_both_directions() -> Result<()> {
        let mut group = group();
        group.relate(0, 1, "parent", Some("child"))?;
        group.relate(0, 2, "friend", None)?;

        let alice: Vec<_> = group
            .relations_of(0)
            .map(|(person, label)| (person.id().clone(), label.to_string()))
            .collect();
        assert_eq!(
            alice,
            vec![
                ("2".to_string(), "parent".to_string()),
                ("3".to_string(), "friend".to_string())
            ]
        );

        let bob: Vec<_> = group.relations_of(1).collect();
        assert_eq!(bob.len(), 1);
        assert_eq!(bob[0].0.id(), "1");
        assert_eq!(bob[0].1, "child");

        let carol: Vec<_> = group.relations_of(2).map(|(_, label)| label).collect();
        assert_eq!(carol, vec!["friend"]);
        Ok(())
    }

    #[test]
    fn test_relate_out_of_range() {
        let mut group = group();
        assert!(group.relate(0, 3, "friend", None).is_err());
        assert_eq!(group.relations_of(0).count(), 0);
    }

    #[test]
    fn test_get_mut_updates_in_place() -> Result<()> {
        let mut group = group();
        if let Some(person) = group.get_mut(1) {
            person.age_verb(5)?;
        }
        assert_eq!(*group.find_by_id("2")?.age(), 30);
        Ok(())
    }
}
