//! Testes para DevFS (Device Filesystem)

#![cfg(test)]

use super::EchoDevice;
use crate::drivers::base::class::{DeviceClass, NodePublisher};
use crate::fs::devfs::{
    DevFS, Device, DeviceNumber, OpenFlags, UserSlice, CHRDEV_MAJOR_DYN_END,
    CHRDEV_MAJOR_DYN_START,
};
use crate::sys::error::Errno;
use core::sync::atomic::Ordering;
use std::sync::Arc;

fn devfs_with_class(class: &str) -> (Arc<DevFS>, DeviceClass, DeviceNumber) {
    let devfs = Arc::new(DevFS::new());
    let region = devfs.alloc_chrdev_region(0, 4, "teste").unwrap();
    let class = DeviceClass::create(class, devfs.clone()).unwrap();
    (devfs, class, region.base())
}

#[test]
fn test_device_number_to_u64() {
    let dev = DeviceNumber::new(1, 3);
    // Linux format: major << 20 | minor
    assert_eq!(dev.as_u64(), (1u64 << 20) | 3);
    assert_eq!(DeviceNumber::from_u64(dev.as_u64()), dev);
}

#[test]
fn test_dynamic_majors_are_distinct() {
    let devfs = DevFS::new();
    let a = devfs.alloc_chrdev_region(0, 8, "a").unwrap();
    let b = devfs.alloc_chrdev_region(0, 8, "b").unwrap();
    assert_eq!(a.major(), CHRDEV_MAJOR_DYN_START);
    assert_eq!(b.major(), CHRDEV_MAJOR_DYN_START - 1);
    assert_eq!(a.devt(7), Some(DeviceNumber::new(a.major(), 7)));
    assert_eq!(a.devt(8), None);

    devfs.unregister_chrdev_region(&a).unwrap();
    let c = devfs.alloc_chrdev_region(0, 8, "c").unwrap();
    assert_eq!(c.major(), CHRDEV_MAJOR_DYN_START);
    assert_eq!(devfs.unregister_chrdev_region(&a), Err(Errno::ENOENT));
}

#[test]
fn test_dynamic_majors_exhaust() {
    let devfs = DevFS::new();
    let total = CHRDEV_MAJOR_DYN_START - CHRDEV_MAJOR_DYN_END + 1;
    for _ in 0..total {
        devfs.alloc_chrdev_region(0, 1, "x").unwrap();
    }
    assert_eq!(devfs.alloc_chrdev_region(0, 1, "x"), Err(Errno::EBUSY));
    assert_eq!(devfs.alloc_chrdev_region(0, 0, "x"), Err(Errno::EINVAL));
}

#[test]
fn test_open_resolves_published_node() {
    let (devfs, class, base) = devfs_with_class("teste");
    let dev = Arc::new(EchoDevice::new("echo0", DeviceNumber::new(base.major, 2)));
    class.device_create(dev.clone()).unwrap();

    let mut handle = devfs.open("/dev/echo0", OpenFlags::RDWR).unwrap();
    assert_eq!(dev.opens.load(Ordering::SeqCst), 1);

    let mut buf = [0u8; 4];
    assert_eq!(handle.ioctl(0, Some(&mut buf)), Ok(0));
    assert_eq!(u32::from_ne_bytes(buf), 2);

    // Mesmo nó sem o prefixo /dev/
    assert!(devfs.open("echo0", OpenFlags::RDONLY).is_ok());

    handle.close().unwrap();
    assert!(!handle.is_open());
    assert_eq!(handle.ioctl(0, Some(&mut buf)), Err(Errno::EBADF));
    // close sempre sucede
    assert_eq!(handle.close(), Ok(()));
}

#[test]
fn test_open_unknown_node() {
    let devfs = DevFS::new();
    assert_eq!(
        devfs.open("/dev/nada", OpenFlags::RDWR).err(),
        Some(Errno::ENOENT)
    );
}

#[test]
fn test_publish_requires_class_and_region() {
    let devfs = Arc::new(DevFS::new());
    let dev = Arc::new(EchoDevice::new("echo0", DeviceNumber::new(250, 0)));
    assert_eq!(devfs.publish("teste", dev.clone()), Err(Errno::ENOENT));

    devfs.register_class("teste").unwrap();
    assert_eq!(devfs.publish("teste", dev.clone()), Err(Errno::ENXIO));
    assert_eq!(devfs.node_count(), 0);
}

#[test]
fn test_duplicate_names_rejected() {
    let (devfs, class, base) = devfs_with_class("teste");
    class
        .device_create(Arc::new(EchoDevice::new("echo", DeviceNumber::new(base.major, 0))))
        .unwrap();
    assert_eq!(
        class.device_create(Arc::new(EchoDevice::new("echo", DeviceNumber::new(base.major, 1)))),
        Err(Errno::EEXIST)
    );
    assert_eq!(
        class.device_create(Arc::new(EchoDevice::new("other", DeviceNumber::new(base.major, 0)))),
        Err(Errno::EEXIST)
    );
    assert_eq!(devfs.node_names(), vec![String::from("echo")]);
    assert_eq!(DeviceClass::create("teste", devfs.clone()).err(), Some(Errno::EEXIST));
}

#[test]
fn test_unpublished_node_fails_open_and_orphans_handles() {
    let (devfs, class, base) = devfs_with_class("teste");
    let devt = DeviceNumber::new(base.major, 1);
    let dev: Arc<dyn Device> = Arc::new(EchoDevice::new("echo1", devt));
    class.device_create(dev.clone()).unwrap();

    let handle = devfs.open("echo1", OpenFlags::RDWR).unwrap();
    class.device_destroy(devt).unwrap();
    drop(dev);

    assert_eq!(devfs.open("echo1", OpenFlags::RDWR).err(), Some(Errno::ENOENT));
    let mut buf = [0u8; 4];
    assert_eq!(handle.ioctl(0, Some(&mut buf)), Err(Errno::ENODEV));
    assert_eq!(class.device_destroy(devt), Err(Errno::ENOENT));
}

#[test]
fn test_drop_closes_handle() {
    let (devfs, class, base) = devfs_with_class("teste");
    let dev = Arc::new(EchoDevice::new("echo3", DeviceNumber::new(base.major, 3)));
    class.device_create(dev.clone()).unwrap();
    {
        let _handle = devfs.open("echo3", OpenFlags::RDWR).unwrap();
    }
    assert_eq!(dev.closes.load(Ordering::SeqCst), 1);
}

#[test]
fn test_user_slice_bounds() {
    use crate::fs::devfs::UserBuffer;
    let mut short = [0u8; 2];
    assert_eq!(
        UserSlice(&mut short[..]).copy_to_user(&[1, 2, 3, 4]),
        Err(Errno::EFAULT)
    );
    let mut exact = [0u8; 4];
    assert_eq!(exact.copy_to_user(&[1, 2, 3, 4]), Ok(()));
    assert_eq!(exact, [1, 2, 3, 4]);
}

#[test]
fn test_class_destroy() {
    let (devfs, class, _) = devfs_with_class("teste");
    assert!(devfs.has_class("teste"));
    class.destroy().unwrap();
    assert!(!devfs.has_class("teste"));
}
