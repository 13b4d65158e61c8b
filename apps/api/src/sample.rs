//! Canonical sample résumé, served to editors as a starting point.
//!
//! Shape: one name, four header links, one education entry, two projects, two
//! experience entries, certifications present, no keyword bank.

pub const SAMPLE_JSON: &str = r#"{
  "meta": { "version": 2, "generatedAt": "2026-03-14T09:30:00.000Z" },
  "header": {
    "fullName": "Maya Lindqvist",
    "headline": "Backend Engineer • Rust | Go | Distributed Systems",
    "location": "Gothenburg, Sweden",
    "phone": "+46 70 123 45 67",
    "email": "maya.lindqvist@example.com",
    "links": [
      { "label": "LinkedIn", "url": "https://www.linkedin.com/in/maya-lindqvist/" },
      { "label": "GitHub", "url": "https://github.com/mlindqvist" },
      { "label": "Codeforces", "url": "https://codeforces.com/profile/mlindqvist" },
      { "label": "Portfolio", "url": "https://mlindqvist.dev/" }
    ]
  },
  "summary": {
    "paragraph": "Backend engineer focused on throughput and predictable latency. Built an event-ingestion pipeline serving 30k events/s and cut tail latency (−70% p99) with batching, back-pressure and careful allocation work."
  },
  "education": [
    {
      "institution": "Chalmers University of Technology",
      "location": "Gothenburg, Sweden",
      "degree": "MSc in Computer Systems and Networks",
      "start": "Aug 2018",
      "end": "Jun 2020",
      "gpaLabel": "Final GPA",
      "gpa": "4.6/5",
      "coursework": ["Distributed Systems", "Compilers", "Operating Systems", "Databases"],
      "honors": ["Dean's List", "Best Thesis Award — Systems Track"]
    }
  ],
  "projects": [
    {
      "name": "Tidewater — Log Shipping Agent",
      "role": "Author / Maintainer",
      "end": "Feb 2026",
      "bullets": [
        "Wrote a lock-free ring buffer shipping 1.2 GB/min of logs at under 3% CPU.",
        "Added at-least-once delivery with on-disk checkpoints; zero data loss across 40 chaos runs.",
        "Reached 900+ GitHub stars and 25 external contributors."
      ],
      "tech": ["Rust", "Tokio", "Kafka", "Prometheus"],
      "links": [{ "label": "GitHub", "url": "https://github.com/mlindqvist/tidewater" }]
    },
    {
      "name": "Quorum Playground",
      "role": "Solo",
      "start": "Sep 2021",
      "end": "Dec 2021",
      "bullets": [
        "Interactive Raft visualizer for teaching consensus; used in two university courses.",
        "Deterministic simulation of partitions and clock skew in the browser via WebAssembly."
      ],
      "tech": ["Rust", "WebAssembly", "TypeScript"],
      "links": [
        { "label": "GitHub", "url": "https://github.com/mlindqvist/quorum-playground" },
        { "label": "Demo", "url": "https://quorum.mlindqvist.dev/" }
      ]
    }
  ],
  "experience": [
    {
      "company": "Northwind Telemetry",
      "title": "Senior Backend Engineer",
      "location": "Hybrid — Gothenburg / Remote",
      "employmentType": "Full-time",
      "start": "Mar 2023",
      "end": "Present",
      "bullets": [
        "Led the rewrite of the ingestion tier from Python to Rust, raising throughput 4x on the same hardware.",
        "Designed tenant-aware rate limiting that removed noisy-neighbour incidents for 300+ customers.",
        "Mentored four engineers; introduced design reviews and on-call runbooks."
      ],
      "tech": ["Rust", "Go", "PostgreSQL", "Kafka", "Kubernetes"]
    },
    {
      "company": "Fjord Payments",
      "title": "Software Engineer",
      "location": "Stockholm, Sweden",
      "employmentType": "Full-time",
      "start": "Aug 2020",
      "end": "Feb 2023",
      "bullets": [
        "Built the idempotent settlement service handling €2B/year with exactly-once ledger writes.",
        "Cut reconciliation batch time from 3 hours to 25 minutes with partitioned parallel jobs."
      ],
      "tech": ["Go", "PostgreSQL", "Redis", "AWS"]
    }
  ],
  "technicalSkills": {
    "programmingLanguages": ["Rust", "Go", "Python", "SQL", "TypeScript"],
    "frameworks": ["Tokio", "Axum", "gRPC", "React"],
    "cloudDevOps": ["AWS", "Kubernetes", "Terraform", "GitHub Actions"],
    "databases": ["PostgreSQL", "Redis", "ClickHouse"]
  },
  "achievements": [
    "Codeforces: Expert (max rating 1850), 600+ problems solved",
    "Speaker at EuroRust 2025 — \"Back-pressure all the way down\""
  ],
  "certifications": ["AWS Certified Solutions Architect – Associate", "CKA: Certified Kubernetes Administrator"]
}"#;
