use crate::models::{DeviceLogTable, DeviceTable, RelayTable, Table};

pub struct SchemaManager {
    tables: Vec<Box<dyn Table>>,
}

impl SchemaManager {
    pub fn new(tables: Vec<Box<dyn Table>>) -> Self {
        Self {
            tables: Self::resolve_order(tables),
        }
    }

    /// Orders tables so that every table comes after the ones it references.
    fn resolve_order(mut pending: Vec<Box<dyn Table>>) -> Vec<Box<dyn Table>> {
        let mut ordered: Vec<Box<dyn Table>> = Vec::with_capacity(pending.len());

        while !pending.is_empty() {
            let ready = pending.iter().position(|table| {
                table.dependencies().iter().all(|dep| {
                    ordered.iter().any(|resolved| resolved.name() == *dep)
                        || !pending.iter().any(|other| other.name() == *dep)
                })
            });

            match ready {
                Some(index) => ordered.push(pending.remove(index)),
                None => panic!("Circular dependency detected between tables."),
            }
        }

        ordered
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn create_schema(&self) -> Vec<String> {
        self.tables.iter().map(|table| table.create()).collect()
    }

    pub fn dispose_schema(&self) -> Vec<String> {
        self.tables.iter().rev().map(|table| table.dispose()).collect()
    }
}

impl Default for SchemaManager {
    fn default() -> Self {
        SchemaManager::new(vec![
            Box::new(DeviceTable),
            Box::new(DeviceLogTable),
            Box::new(RelayTable),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockTable {
        name: &'static str,
        dependencies: Vec<&'static str>,
    }

    impl Table for MockTable {
        fn name(&self) -> &'static str {
            self.name
        }

        fn create(&self) -> String {
            format!("CREATE TABLE {};", self.name)
        }

        fn dispose(&self) -> String {
            format!("DROP TABLE {};", self.name)
        }

        fn dependencies(&self) -> Vec<&'static str> {
            self.dependencies.clone()
        }
    }

    fn mock(name: &'static str, dependencies: Vec<&'static str>) -> Box<dyn Table> {
        Box::new(MockTable { name, dependencies })
    }

    #[test]
    fn test_correct_creation_order() {
        let manager = SchemaManager::new(vec![
            mock("device_logs", vec!["devices"]),
            mock("relay_state", vec![]),
            mock("devices", vec![]),
        ]);

        let statements = manager.create_schema();
        let logs = statements.iter().position(|s| s == "CREATE TABLE device_logs;");
        let devices = statements.iter().position(|s| s == "CREATE TABLE devices;");

        assert_eq!(statements.len(), 3);
        assert!(devices < logs);
    }

    #[test]
    fn test_dispose_order_is_reversed() {
        let manager = SchemaManager::new(vec![
            mock("device_logs", vec!["devices"]),
            mock("devices", vec![]),
        ]);

        assert_eq!(
            manager.dispose_schema(),
            vec!["DROP TABLE device_logs;", "DROP TABLE devices;"]
        );
    }

    #[test]
    #[should_panic(expected = "Circular dependency")]
    fn test_circular_dependency_panics() {
        SchemaManager::new(vec![mock("a", vec!["b"]), mock("b", vec!["a"])]);
    }

    #[test]
    fn test_default_schema_covers_every_table() {
        let manager = SchemaManager::default();
        let statements = manager.create_schema().join("\n");

        assert_eq!(manager.len(), 3);
        assert!(statements.contains("CREATE TABLE IF NOT EXISTS devices"));
        assert!(statements.contains("CREATE TABLE IF NOT EXISTS device_logs"));
        assert!(statements.contains("CREATE TABLE IF NOT EXISTS relay_state"));
    }
}
