use blintz_codec::obj::{Obj, Structured};
use blintz_codec::registry::Registry;
use blintz_types::error::RegistryError;
use blintz_types::schema::Schema;
use std::any::Any;

#[derive(Default, PartialEq, Debug)]
pub struct User {
    pub name: String,
    pub age: i64,
    pub tags: Vec<String>,
}

impl Structured for User {
    fn get(&self, field: &str) -> Option<Obj> {
        match field {
            "name" => Some(Obj::from(self.name.as_str())),
            "age" => Some(Obj::Int(self.age)),
            "tags" => Some(Obj::List(
                self.tags.iter().map(|t| Obj::from(t.as_str())).collect(),
            )),
            _ => None,
        }
    }
    fn set(&mut self, field: &str, obj: Obj) -> Result<(), RegistryError> {
        match (field, obj) {
            ("name", Obj::Str(s)) => self.name = s,
            ("age", Obj::Int(i)) => self.age = i,
            ("tags", Obj::List(items)) => {
                let mut tags = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Obj::Str(s) => tags.push(s),
                        other => return Err(set_err(field, &other)),
                    }
                }
                self.tags = tags;
            }
            (field, obj) => return Err(set_err(field, &obj)),
        }
        Ok(())
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn eq_obj(&self, other: &dyn Structured) -> bool {
        match other.as_any().downcast_ref::<User>() {
            Some(other) => self == other,
            None => false,
        }
    }
}

#[derive(Default, PartialEq, Debug)]
pub struct Account {
    pub balance: Option<i64>,
}

impl Structured for Account {
    fn get(&self, field: &str) -> Option<Obj> {
        match field {
            "balance" => Some(match self.balance {
                Some(i) => Obj::Int(i),
                None => Obj::Null,
            }),
            _ => None,
        }
    }
    fn set(&mut self, field: &str, obj: Obj) -> Result<(), RegistryError> {
        match (field, obj) {
            ("balance", Obj::Int(i)) => self.balance = Some(i),
            ("balance", Obj::Null) => self.balance = None,
            (field, obj) => return Err(set_err(field, &obj)),
        }
        Ok(())
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn eq_obj(&self, other: &dyn Structured) -> bool {
        match other.as_any().downcast_ref::<Account>() {
            Some(other) => self == other,
            None => false,
        }
    }
}

fn set_err(field: &str, obj: &Obj) -> RegistryError {
    RegistryError::SetField {
        field: String::from(field),
        reason: format!("no {} field taking a {}", field, obj.desc()),
    }
}

pub fn user_schema() -> Schema {
    Schema::Class {
        classname: String::from("User"),
        fields: vec![
            (String::from("name"), Schema::Str),
            (String::from("age"), Schema::Int),
            (
                String::from("tags"),
                Schema::List {
                    elem: Box::new(Schema::Str),
                },
            ),
        ],
    }
}

pub fn account_schema() -> Schema {
    Schema::Class {
        classname: String::from("Account"),
        fields: vec![(
            String::from("balance"),
            Schema::Nullable(Box::new(Schema::Int)),
        )],
    }
}

pub fn registry() -> Registry {
    let mut registry = Registry::new();
    registry.register("User", || Box::<User>::default());
    registry.register("Account", || Box::<Account>::default());
    registry
}
