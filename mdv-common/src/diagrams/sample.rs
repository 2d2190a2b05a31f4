//! Built-in sample diagrams
//!
//! Substituted verbatim whenever the source file yields nothing usable, so
//! the store is never empty.

use super::model::{Diagram, DiagramType};

const SYSTEM_ARCHITECTURE: &str = concat!(
    "graph TB\n",
    "    subgraph \"Client Layer\"\n",
    "        A[Web Browser]\n",
    "        B[Mobile Browser]\n",
    "    end\n",
    "    \n",
    "    subgraph \"Flask Application Layer\"\n",
    "        C[Flask App]\n",
    "        D[Authentication Module]\n",
    "        E[API Endpoints]\n",
    "        F[Report Generation]\n",
    "        G[QR Code Service]\n",
    "    end\n",
    "    \n",
    "    subgraph \"Database Layer\"\n",
    "        H[(PostgreSQL)]\n",
    "        I[Users Table]\n",
    "        J[Learners Table]\n",
    "        K[Attendance Table]\n",
    "    end\n",
    "    \n",
    "    subgraph \"External Services\"\n",
    "        L[Azure Blob Storage - QR Codes]\n",
    "        M[PDF Generation - ReportLab]\n",
    "    end\n",
    "    \n",
    "    A --> C\n",
    "    B --> C\n",
    "    C --> D\n",
    "    C --> E\n",
    "    C --> F\n",
    "    C --> G\n",
    "    D --> H\n",
    "    E --> H\n",
    "    G --> L\n",
    "    F --> M\n",
    "    H --> I\n",
    "    H --> J\n",
    "    H --> K\n",
    "    \n",
    "    style A fill:#e1f5fe\n",
    "    style B fill:#e1f5fe\n",
    "    style C fill:#f3e5f5\n",
    "    style D fill:#fce4ec\n",
    "    style E fill:#e8f5e8\n",
    "    style F fill:#fff3e0\n",
    "    style G fill:#e0f2f1",
);

const DATABASE_SCHEMA: &str = concat!(
    "erDiagram\n",
    "    User ||--o{ Attendance : manages\n",
    "    User {\n",
    "        int id PK\n",
    "        string username UK\n",
    "        string email UK\n",
    "        string password_hash\n",
    "    }\n",
    "    \n",
    "    Learner ||--o{ Attendance : has\n",
    "    Learner {\n",
    "        int id PK\n",
    "        string student_id UK\n",
    "        string first_name\n",
    "        string last_name\n",
    "        string email\n",
    "        string phone\n",
    "        string course\n",
    "        string pin_hash\n",
    "        datetime created_at\n",
    "        string qr_code_path\n",
    "    }\n",
    "    \n",
    "    Attendance {\n",
    "        int id PK\n",
    "        int learner_id FK\n",
    "        datetime timestamp\n",
    "        string status\n",
    "        text notes\n",
    "    }\n",
    "    \n",
    "    QRCodeGenerator ||..|| Learner : generates_for\n",
    "    QRCodeGenerator {\n",
    "        -- Static Class --\n",
    "        generate_qr_code()\n",
    "        upload_to_azure()\n",
    "        save_locally()\n",
    "    }",
);

const AUTH_SESSION_FLOW: &str = concat!(
    "sequenceDiagram\n",
    "    participant User as User\n",
    "    participant Flask as Flask App\n",
    "    participant DB as Database\n",
    "    participant Session as Session Manager\n",
    "    \n",
    "    User->>Flask: GET /login\n",
    "    Flask-->>User: Render Login Form\n",
    "    \n",
    "    User->>Flask: POST /login (credentials)\n",
    "    Flask->>DB: Query User Table\n",
    "    DB-->>Flask: User Data\n",
    "    \n",
    "    alt Valid Credentials\n",
    "        Flask->>Session: Create Session\n",
    "        Flask->>User: Redirect to /dashboard\n",
    "        User->>Flask: Access Protected Route\n",
    "        Flask->>Session: Verify Session\n",
    "        Session-->>Flask: Session Valid\n",
    "        Flask-->>User: Render Protected Content\n",
    "    else Invalid Credentials\n",
    "        Flask-->>User: Show Error Message\n",
    "    end\n",
    "    \n",
    "    User->>Flask: GET /logout\n",
    "    Flask->>Session: Destroy Session\n",
    "    Flask-->>User: Redirect to Login",
);

const ATTENDANCE_FLOW: &str = concat!(
    "flowchart TD\n",
    "    Start([Start]) --> Access[Access Attendance URL]\n",
    "    Access --> PINCheck{PIN Verified?}\n",
    "    \n",
    "    PINCheck -- No --> PINPage[Redirect to PIN Validation]\n",
    "    PINPage --> PINEntry[Enter PIN]\n",
    "    PINEntry --> Verify[Verify PIN via API]\n",
    "    Verify --> CheckPIN{PIN Valid?}\n",
    "    \n",
    "    CheckPIN -- Yes --> Verified[Set Verified Flag]\n",
    "    CheckPIN -- No --> PINError[Show PIN Error]\n",
    "    PINError --> PINEntry\n",
    "    \n",
    "    PINCheck -- Yes --> Lookup[Lookup Student]\n",
    "    Lookup --> CheckExist{Student Exists?}\n",
    "    \n",
    "    CheckExist -- No --> NotFound[Show Student Not Found]\n",
    "    CheckExist -- Yes --> CheckToday{Attendance Today?}\n",
    "    \n",
    "    CheckToday -- Yes --> Update[Update Status]\n",
    "    Update --> Record[Record Updated]\n",
    "    \n",
    "    CheckToday -- No --> Create[Create New Record]\n",
    "    Create --> Record\n",
    "    \n",
    "    Record --> Display[Show Attendance Result]\n",
    "    Display --> End([End])\n",
    "    \n",
    "    NotFound --> End",
);

const API_ENDPOINTS: &str = concat!(
    "graph TB\n",
    "    subgraph \"Authentication\"\n",
    "        A1[GET /login]\n",
    "        A2[POST /login]\n",
    "        A3[GET /logout]\n",
    "    end\n",
    "    \n",
    "    subgraph \"Protected Routes\"\n",
    "        B1[GET / - Dashboard]\n",
    "        B2[GET /learners]\n",
    "        B3[GET /reports]\n",
    "        B4[GET /admin/system-status]\n",
    "    end\n",
    "    \n",
    "    subgraph \"API Endpoints\"\n",
    "        C1[GET /api/learners]\n",
    "        C2[GET /api/attendance]\n",
    "        C3[GET /api/analytics]\n",
    "        C4[POST /api/generate-report]\n",
    "        C5[POST /api/verify-pin]\n",
    "        C6[POST /api/set-pin/]\n",
    "        C7[GET /api/health]\n",
    "    end\n",
    "    \n",
    "    subgraph \"Mobile Routes\"\n",
    "        D1[GET /mobile/student-list]\n",
    "        D2[GET /mobile/attendance/]\n",
    "        D3[GET /mobile/absence/]\n",
    "        D4[GET /pin-validation/]\n",
    "    end\n",
    "    \n",
    "    subgraph \"Public Routes\"\n",
    "        E1[GET /public/student-cards]\n",
    "    end\n",
    "    \n",
    "    subgraph \"Admin Routes\"\n",
    "        F1[POST /api/bulk-set-pins]\n",
    "        F2[POST /api/reset-all-pins]\n",
    "        F3[GET /init-db]\n",
    "    end\n",
    "    \n",
    "    A1 & A2 --> B1\n",
    "    B1 --> C1 & C2 & C3\n",
    "    B2 --> D1\n",
    "    B3 --> C4\n",
    "    B4 --> C7\n",
    "    D1 --> D2 & D3\n",
    "    D2 & D3 --> D4\n",
    "    D4 --> C5",
);

/// Title, content, type and section of each sample, in id order
const SAMPLES: [(&str, &str, DiagramType, i64); 5] = [
    ("System Architecture Diagram", SYSTEM_ARCHITECTURE, DiagramType::Graph, 1),
    ("Database Schema Diagram", DATABASE_SCHEMA, DiagramType::Er, 2),
    ("Authentication & Session Flow Diagram", AUTH_SESSION_FLOW, DiagramType::Sequence, 3),
    ("Attendance Marking Flow Diagram", ATTENDANCE_FLOW, DiagramType::Flowchart, 4),
    ("API Endpoints Structure Diagram", API_ENDPOINTS, DiagramType::Graph, 5),
];

/// The fixed five-entry sample set (ids 1-5, sections 1-5)
pub fn sample_diagrams() -> Vec<Diagram> {
    SAMPLES
        .iter()
        .zip(1u32..)
        .map(|(&(title, content, diagram_type, section), id)| Diagram {
            id,
            title: title.to_string(),
            content: content.to_string(),
            diagram_type,
            section,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagrams::classify::classify;

    #[test]
    fn test_sample_ids_and_sections() {
        let samples = sample_diagrams();
        assert_eq!(samples.len(), 5);
        for (i, diagram) in samples.iter().enumerate() {
            assert_eq!(diagram.id as usize, i + 1);
            assert_eq!(diagram.section, i as i64 + 1);
        }
    }

    #[test]
    fn test_sample_types_match_classifier() {
        let classified: Vec<DiagramType> = sample_diagrams()
            .iter()
            .map(|d| classify(&d.content))
            .collect();
        assert_eq!(
            classified,
            vec![
                DiagramType::Graph,
                DiagramType::Er,
                DiagramType::Sequence,
                DiagramType::Flowchart,
                DiagramType::Graph,
            ]
        );
        for diagram in sample_diagrams() {
            assert_eq!(classify(&diagram.content), diagram.diagram_type);
        }
    }

    #[test]
    fn test_sample_content_is_reproducible() {
        assert_eq!(sample_diagrams(), sample_diagrams());
        let first = &sample_diagrams()[0];
        assert!(first.content.starts_with("graph TB\n    subgraph \"Client Layer\""));
        assert!(first.content.ends_with("style G fill:#e0f2f1"));
    }
}
