//! Tests for lecturer record maintenance

use std::sync::Arc;

use core_kernel::LecturerId;
use domain_lecturer::{
    Lecturer, LecturerDetails, LecturerError, LecturerPort, LecturerService, MockLecturerPort,
};

fn service() -> (LecturerService, Arc<MockLecturerPort>) {
    let port = Arc::new(MockLecturerPort::new());
    (LecturerService::new(port.clone()), port)
}

fn details(name: &str, email: &str) -> LecturerDetails {
    LecturerDetails::new(name, email)
}

mod register_tests {
    use super::*;

    #[tokio::test]
    async fn test_register_normalizes_and_stores() {
        let (service, port) = service();

        let lecturer = service
            .register(details(" Sipho Dlamini ", "Sipho@Example.com").with_contact_number("082 555 0199"))
            .await
            .unwrap();

        assert_eq!(lecturer.name, "Sipho Dlamini");
        assert_eq!(lecturer.email, "sipho@example.com");
        assert_eq!(port.get(lecturer.id).await.unwrap(), Some(lecturer));
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_details() {
        let (service, port) = service();

        let err = service.register(details("", "nobody")).await.unwrap_err();

        match err {
            LecturerError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(port.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let (service, _) = service();
        service.register(details("A", "a@example.com")).await.unwrap();

        let err = service.register(details("B", "A@EXAMPLE.COM")).await.unwrap_err();
        assert!(matches!(err, LecturerError::DuplicateEmail(ref e) if e == "a@example.com"));
    }
}

mod update_tests {
    use super::*;

    #[tokio::test]
    async fn test_update_details() {
        let (service, _) = service();
        let lecturer = service.register(details("A", "a@example.com")).await.unwrap();

        let updated = service
            .update(lecturer.id, details("A. Person", "a@example.com").with_contact_number("+27 21 555 0101"))
            .await
            .unwrap();

        assert_eq!(updated.id, lecturer.id);
        assert_eq!(updated.name, "A. Person");
        assert_eq!(updated.contact_number.as_deref(), Some("+27 21 555 0101"));
        assert_eq!(service.get(lecturer.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_cannot_take_another_email() {
        let (service, _) = service();
        service.register(details("A", "a@example.com")).await.unwrap();
        let b = service.register(details("B", "b@example.com")).await.unwrap();

        let err = service.update(b.id, details("B", "a@example.com")).await.unwrap_err();
        assert!(matches!(err, LecturerError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn test_update_unknown_lecturer() {
        let (service, _) = service();
        let err = service
            .update(LecturerId::new_v7(), details("A", "a@example.com"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}

mod listing_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let port = MockLecturerPort::with_lecturers(vec![
            Lecturer::new(details("Zanele", "z@example.com")),
            Lecturer::new(details("Anele", "an@example.com")),
        ])
        .await;
        let service = LecturerService::new(Arc::new(port));

        let names: Vec<String> = service.list().await.unwrap().into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["Anele", "Zanele"]);
    }

    #[tokio::test]
    async fn test_remove() {
        let (service, _) = service();
        let lecturer = service.register(details("A", "a@example.com")).await.unwrap();

        service.remove(lecturer.id).await.unwrap();

        assert!(service.get(lecturer.id).await.unwrap_err().is_not_found());
        assert!(service.remove(lecturer.id).await.unwrap_err().is_not_found());
    }
}
