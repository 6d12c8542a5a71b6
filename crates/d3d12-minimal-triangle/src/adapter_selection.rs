use tracing::info;

/// What adapter selection needs to know about one enumerated adapter.
pub trait AdapterProbe {
    fn name(&self) -> String;
    fn is_software(&self) -> bool;
    /// Whether a device at the minimum feature level can be created on it.
    fn supports_minimum_feature_level(&self) -> bool;
}

/// Returns the first hardware adapter that supports the minimum feature level.
///
/// Adapters are taken in enumeration order. An enumeration error stops the
/// search and is returned.
pub fn select_first_hardware<A, E, I>(adapters: I) -> Result<Option<A>, E>
where
    A: AdapterProbe,
    I: IntoIterator<Item = Result<A, E>>,
{
    for (index, adapter) in adapters.into_iter().enumerate() {
        let adapter = adapter?;
        let name = adapter.name();
        if adapter.is_software() {
            info!(index, %name, "skipping software adapter");
            continue;
        }
        if !adapter.supports_minimum_feature_level() {
            info!(index, %name, "adapter below minimum feature level");
            continue;
        }
        info!(index, %name, "selected adapter");
        return Ok(Some(adapter));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct FakeAdapter {
        name: &'static str,
        software: bool,
        capable: bool,
    }

    impl AdapterProbe for FakeAdapter {
        fn name(&self) -> String {
            self.name.to_string()
        }
        fn is_software(&self) -> bool {
            self.software
        }
        fn supports_minimum_feature_level(&self) -> bool {
            self.capable
        }
    }

    fn adapter(name: &'static str, software: bool, capable: bool) -> Result<FakeAdapter, String> {
        Ok(FakeAdapter {
            name,
            software,
            capable,
        })
    }

    #[test]
    fn software_adapters_are_rejected_even_when_capable() {
        let selected = select_first_hardware(vec![
            adapter("Basic Render Driver", true, true),
            adapter("Discrete GPU", false, true),
        ])
        .unwrap();
        assert_eq!(selected.unwrap().name, "Discrete GPU");
    }

    #[test]
    fn first_capable_hardware_adapter_wins() {
        let selected = select_first_hardware(vec![
            adapter("Old GPU", false, false),
            adapter("Integrated GPU", false, true),
            adapter("Discrete GPU", false, true),
        ])
        .unwrap();
        assert_eq!(selected.unwrap().name, "Integrated GPU");
    }

    #[test]
    fn no_match_is_none() {
        let selected =
            select_first_hardware(vec![adapter("Basic Render Driver", true, true)]).unwrap();
        assert_eq!(selected, None);
        assert_eq!(
            select_first_hardware(Vec::<Result<FakeAdapter, String>>::new()).unwrap(),
            None
        );
    }

    #[test]
    fn enumeration_errors_stop_the_search() {
        let result = select_first_hardware(vec![
            adapter("Old GPU", false, false),
            Err("driver failure".to_string()),
            adapter("Discrete GPU", false, true),
        ]);
        assert_eq!(result, Err("driver failure".to_string()));
    }
}
