use std::rc::Rc;

use temps_blob_url::{
    BlobHandle, BlobOptions, BlobUrlError, Endings, HandleState, MemoryRegistry, RegistryConfig,
};

#[test]
fn test_download_link_lifecycle() {
    let registry = MemoryRegistry::new(
        RegistryConfig::from_json(r#"{"origin": "https://app.example.com"}"#).unwrap(),
    );
    let mut handle = BlobHandle::new(registry.clone());

    handle.set_content(
        ["id,name\r\n", "1,alpha\r\n"],
        &BlobOptions::with_type("text/csv").endings(Endings::Transparent),
    );
    let url = handle.reference_url().unwrap().to_string();

    assert!(url.starts_with("blob:https://app.example.com/"));
    let blob = registry.resolve(&url).unwrap();
    assert_eq!(blob.text(), "id,name\r\n1,alpha\r\n");
    assert_eq!(blob.content_type(), "text/csv");

    // Same link handed out again without growing the table
    assert_eq!(handle.reference_url().unwrap(), url);
    assert_eq!(registry.len(), 1);

    handle.dispose();
    assert!(registry.resolve(&url).is_none());
    assert_eq!(handle.state(), HandleState::Disposed);
}

#[test]
fn test_many_handles_share_one_registry() {
    let registry = Rc::new(MemoryRegistry::default());
    let mut handles: Vec<_> = (0..5)
        .map(|i| {
            let mut handle = BlobHandle::new(Rc::clone(&registry));
            handle.set_content([format!("frame {}", i)], &BlobOptions::default());
            handle
        })
        .collect();

    let urls: Vec<String> = handles
        .iter_mut()
        .map(|handle| handle.reference_url().unwrap().to_string())
        .collect();
    assert_eq!(registry.len(), 5);
    assert_eq!(registry.resolve(&urls[3]).unwrap().text(), "frame 3");

    handles.truncate(2);
    assert_eq!(registry.len(), 2);
    assert!(registry.contains(&urls[0]));
    assert!(!registry.contains(&urls[4]));

    drop(handles);
    assert!(registry.is_empty());
}

#[test]
fn test_capacity_recovers_after_reassignment() {
    let registry = MemoryRegistry::new(RegistryConfig {
        capacity: Some(1),
        ..Default::default()
    });
    let mut handle = BlobHandle::new(registry.clone());

    // Reassigning content frees the old slot, so the table never overflows
    for version in 0..10 {
        handle.set_content([format!("v{}", version)], &BlobOptions::default());
        let url = handle.reference_url().unwrap().to_string();
        assert_eq!(registry.resolve(&url).unwrap().text(), format!("v{}", version));
    }

    let mut other = BlobHandle::new(registry.clone());
    assert_eq!(
        other.reference_url().unwrap_err(),
        BlobUrlError::RegistryFull { capacity: 1 }
    );
}
