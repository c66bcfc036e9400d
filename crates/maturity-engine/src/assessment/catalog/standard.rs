//! Built-in catalogs for the Control Tower migration and Golden Architecture assessments.

use super::{AnswerOption, Catalog, Domain, Question, RiskLevel};
use crate::assessment::responses::Score;

pub const CONTROL_TOWER_KEY: &str = "control-tower";
pub const GOLDEN_ARCHITECTURE_KEY: &str = "golden-architecture";

/// Default industry reference averages; `ASSESSMENT_BENCHMARK_<KEY>` overrides them at startup.
pub const CONTROL_TOWER_BENCHMARK: f64 = 58.0;
pub const GOLDEN_ARCHITECTURE_BENCHMARK: f64 = 52.0;

pub fn control_tower() -> Catalog {
    Catalog {
        key: CONTROL_TOWER_KEY.to_string(),
        title: "Control Tower Migration Readiness".to_string(),
        benchmark: Some(CONTROL_TOWER_BENCHMARK),
        domains: control_tower_domains(),
    }
}

pub fn golden_architecture() -> Catalog {
    Catalog {
        key: GOLDEN_ARCHITECTURE_KEY.to_string(),
        title: "Golden Architecture (Serverless) Maturity".to_string(),
        benchmark: Some(GOLDEN_ARCHITECTURE_BENCHMARK),
        domains: golden_architecture_domains(),
    }
}

fn ascending(labels: [&str; 5]) -> Vec<AnswerOption> {
    labels
        .into_iter()
        .zip(Score::ALL)
        .map(|(label, score)| AnswerOption {
            label: label.to_string(),
            score,
        })
        .collect()
}

fn descending(labels: [&str; 5]) -> Vec<AnswerOption> {
    labels
        .into_iter()
        .zip(Score::ALL.into_iter().rev())
        .map(|(label, score)| AnswerOption {
            label: label.to_string(),
            score,
        })
        .collect()
}

fn question(id: &str, prompt: &str, risk: RiskLevel, options: Vec<AnswerOption>) -> Question {
    Question {
        id: id.to_string(),
        prompt: prompt.to_string(),
        risk,
        options,
    }
}

fn domain(
    name: &str,
    weight: f64,
    description: &str,
    pillars: &[&str],
    questions: Vec<Question>,
) -> Domain {
    Domain {
        name: name.to_string(),
        weight,
        description: Some(description.to_string()),
        pillars: pillars.iter().map(|pillar| pillar.to_string()).collect(),
        questions,
    }
}

fn control_tower_domains() -> Vec<Domain> {
    vec![
        domain(
            "Landing Zone Architecture",
            0.20,
            "Multi-account structure, account vending and baseline configuration.",
            &["Operational Excellence", "Reliability"],
            vec![
                question(
                    "CT-LZ-001",
                    "What is the current state of your AWS multi-account strategy?",
                    RiskLevel::High,
                    ascending([
                        "No multi-account strategy exists",
                        "Basic account separation (dev/prod)",
                        "Organizational units defined but not enforced",
                        "Well-defined OU structure with some automation",
                        "Mature multi-account with full automation",
                    ]),
                ),
                question(
                    "CT-LZ-002",
                    "How are new AWS accounts currently provisioned?",
                    RiskLevel::Medium,
                    ascending([
                        "Manual creation through console",
                        "Semi-automated with some scripts",
                        "Automated but no standardization",
                        "Account Factory with basic customization",
                        "Fully automated Account Factory with AFT",
                    ]),
                ),
                question(
                    "CT-LZ-003",
                    "What is your current baseline configuration management approach?",
                    RiskLevel::High,
                    ascending([
                        "No baseline configurations",
                        "Manual baseline application",
                        "Partial IaC implementation",
                        "Full IaC with some drift detection",
                        "Complete IaC with automated drift remediation",
                    ]),
                ),
                question(
                    "CT-LZ-004",
                    "How many AWS accounts are currently in scope for Control Tower migration?",
                    RiskLevel::Low,
                    descending([
                        "1-10 accounts",
                        "11-50 accounts",
                        "51-100 accounts",
                        "101-300 accounts",
                        "300+ accounts",
                    ]),
                ),
            ],
        ),
        domain(
            "Governance & Guardrails",
            0.25,
            "Preventive and detective controls, compliance posture and tagging.",
            &["Security", "Cost Optimization"],
            vec![
                question(
                    "CT-GOV-001",
                    "What is your current approach to preventive controls?",
                    RiskLevel::Critical,
                    ascending([
                        "No preventive controls in place",
                        "Basic IAM policies only",
                        "SCPs defined but not comprehensive",
                        "Comprehensive SCPs with some automation",
                        "Full SCP hierarchy with automated enforcement",
                    ]),
                ),
                question(
                    "CT-GOV-002",
                    "How do you currently handle detective controls?",
                    RiskLevel::High,
                    ascending([
                        "No detective controls",
                        "Basic CloudTrail logging",
                        "CloudTrail + some Config rules",
                        "Comprehensive Config rules with alerts",
                        "Full detective controls with auto-remediation",
                    ]),
                ),
                question(
                    "CT-GOV-003",
                    "What is your compliance posture for regulatory requirements?",
                    RiskLevel::Critical,
                    ascending([
                        "No compliance framework",
                        "Awareness of requirements only",
                        "Partial compliance implementation",
                        "Most compliance requirements met",
                        "Full compliance with continuous monitoring",
                    ]),
                ),
                question(
                    "CT-GOV-004",
                    "How are tagging policies enforced across accounts?",
                    RiskLevel::Low,
                    ascending([
                        "No tagging strategy",
                        "Tagging guidelines but no enforcement",
                        "Some automated tagging checks",
                        "Tag policies with partial enforcement",
                        "Mandatory tagging with automated enforcement",
                    ]),
                ),
            ],
        ),
        domain(
            "Security & Identity",
            0.20,
            "Workforce identity, cross-account access and account security baselines.",
            &["Security"],
            vec![
                question(
                    "CT-SEC-001",
                    "What is your current identity management approach for AWS?",
                    RiskLevel::Critical,
                    ascending([
                        "Individual IAM users per account",
                        "Federated access with basic setup",
                        "AWS SSO with basic configuration",
                        "IAM Identity Center with permission sets",
                        "Fully integrated IAM Identity Center with ABAC",
                    ]),
                ),
                question(
                    "CT-SEC-002",
                    "How is cross-account access currently managed?",
                    RiskLevel::Critical,
                    ascending([
                        "Shared credentials",
                        "IAM users with cross-account roles",
                        "Role assumption with basic trust policies",
                        "Well-defined role hierarchy",
                        "Automated role management with least privilege",
                    ]),
                ),
                question(
                    "CT-SEC-003",
                    "What is your security baseline for new accounts?",
                    RiskLevel::High,
                    ascending([
                        "No security baseline",
                        "Manual security configuration",
                        "Partial security automation",
                        "Security baseline with some gaps",
                        "Comprehensive automated security baseline",
                    ]),
                ),
            ],
        ),
        domain(
            "Networking & Connectivity",
            0.15,
            "VPC topology, DNS resolution and hybrid connectivity.",
            &["Reliability", "Performance Efficiency"],
            vec![
                question(
                    "CT-NET-001",
                    "What is your current network architecture approach?",
                    RiskLevel::High,
                    ascending([
                        "Individual VPCs with no connectivity",
                        "VPC peering for some accounts",
                        "Transit Gateway with basic setup",
                        "Hub-spoke with Network Firewall",
                        "Full network architecture with inspection",
                    ]),
                ),
                question(
                    "CT-NET-002",
                    "How is centralized DNS and resolution handled?",
                    RiskLevel::Medium,
                    ascending([
                        "Individual Route53 zones per account",
                        "Some shared hosted zones",
                        "Route53 Resolver with basic rules",
                        "Centralized DNS with some automation",
                        "Fully automated centralized DNS management",
                    ]),
                ),
                question(
                    "CT-NET-003",
                    "What is your approach to network connectivity to on-premises?",
                    RiskLevel::Medium,
                    ascending([
                        "Individual VPN connections per account",
                        "Shared VPN with manual routing",
                        "Direct Connect with basic setup",
                        "Direct Connect Gateway with transit",
                        "Full hybrid connectivity with redundancy",
                    ]),
                ),
            ],
        ),
        domain(
            "Operations & Monitoring",
            0.20,
            "Centralized logging, cost management and operational automation.",
            &["Operational Excellence", "Cost Optimization"],
            vec![
                question(
                    "CT-OPS-001",
                    "How is centralized logging currently implemented?",
                    RiskLevel::High,
                    ascending([
                        "No centralized logging",
                        "CloudTrail to individual S3 buckets",
                        "Centralized logging bucket exists",
                        "Log aggregation with some analysis",
                        "Full log aggregation with SIEM integration",
                    ]),
                ),
                question(
                    "CT-OPS-002",
                    "What is your approach to cost management across accounts?",
                    RiskLevel::Medium,
                    ascending([
                        "Individual account billing review",
                        "Consolidated billing only",
                        "Cost allocation tags defined",
                        "Cost management with budgets and alerts",
                        "Full FinOps with optimization automation",
                    ]),
                ),
                question(
                    "CT-OPS-003",
                    "How mature is your operational runbook and automation?",
                    RiskLevel::Low,
                    ascending([
                        "No documented runbooks",
                        "Basic runbooks exist",
                        "Runbooks with some automation",
                        "Comprehensive runbooks with SSM",
                        "Full automation with self-healing",
                    ]),
                ),
            ],
        ),
    ]
}

fn golden_architecture_domains() -> Vec<Domain> {
    vec![
        domain(
            "Compute & Runtime",
            0.25,
            "Serverless compute adoption, packaging and deployment of functions and containers.",
            &["Performance Efficiency", "Operational Excellence"],
            vec![
                question(
                    "GA-COMP-001",
                    "What is your current serverless compute adoption level?",
                    RiskLevel::Medium,
                    ascending([
                        "No serverless adoption",
                        "Experimental Lambda usage",
                        "Some production Lambda workloads",
                        "Significant serverless footprint",
                        "Serverless-first strategy implemented",
                    ]),
                ),
                question(
                    "GA-COMP-002",
                    "How are Lambda functions organized and deployed?",
                    RiskLevel::High,
                    ascending([
                        "Manual deployments through console",
                        "CLI-based deployments",
                        "SAM or Serverless Framework basics",
                        "Full CI/CD with SAM/CDK",
                        "GitOps with automated testing and deployment",
                    ]),
                ),
                question(
                    "GA-COMP-003",
                    "What is your approach to Lambda layers and shared code?",
                    RiskLevel::Low,
                    ascending([
                        "No shared code strategy",
                        "Copy-paste code sharing",
                        "Some Lambda layers in use",
                        "Layer versioning with dependencies",
                        "Automated layer management with CI/CD",
                    ]),
                ),
                question(
                    "GA-COMP-004",
                    "How do you handle container-based serverless (Fargate)?",
                    RiskLevel::Low,
                    ascending([
                        "No Fargate usage",
                        "Experimental Fargate deployments",
                        "Some Fargate in production",
                        "Fargate with ECS/EKS integration",
                        "Full serverless container strategy",
                    ]),
                ),
            ],
        ),
        domain(
            "API & Integration",
            0.20,
            "API management, event-driven integration and workflow orchestration.",
            &["Reliability", "Performance Efficiency"],
            vec![
                question(
                    "GA-API-001",
                    "What is your API Gateway adoption level?",
                    RiskLevel::Medium,
                    ascending([
                        "No API Gateway usage",
                        "Basic REST APIs",
                        "REST APIs with authorization",
                        "HTTP APIs with advanced features",
                        "Full API management with versioning",
                    ]),
                ),
                question(
                    "GA-API-002",
                    "How are event-driven architectures implemented?",
                    RiskLevel::Medium,
                    ascending([
                        "No event-driven patterns",
                        "Basic SNS/SQS usage",
                        "EventBridge for some integrations",
                        "Event-driven with patterns defined",
                        "Full event mesh with EventBridge",
                    ]),
                ),
                question(
                    "GA-API-003",
                    "What is your approach to Step Functions and orchestration?",
                    RiskLevel::Low,
                    ascending([
                        "No workflow orchestration",
                        "Basic Step Functions experimentation",
                        "Step Functions for some workflows",
                        "Standard and Express workflows",
                        "Full orchestration with error handling",
                    ]),
                ),
            ],
        ),
        domain(
            "Data & Storage",
            0.20,
            "Serverless databases, analytics and caching.",
            &["Reliability", "Cost Optimization"],
            vec![
                question(
                    "GA-DATA-001",
                    "What serverless database services are you using?",
                    RiskLevel::High,
                    ascending([
                        "Traditional RDS only",
                        "Some DynamoDB experimentation",
                        "DynamoDB in production",
                        "DynamoDB with Aurora Serverless",
                        "Full serverless data tier strategy",
                    ]),
                ),
                question(
                    "GA-DATA-002",
                    "How do you handle data lake and analytics serverlessly?",
                    RiskLevel::Medium,
                    ascending([
                        "No serverless analytics",
                        "Basic S3 data storage",
                        "Athena for ad-hoc queries",
                        "Data lake with Glue and Athena",
                        "Full serverless analytics platform",
                    ]),
                ),
                question(
                    "GA-DATA-003",
                    "What is your caching strategy for serverless?",
                    RiskLevel::Low,
                    ascending([
                        "No caching strategy",
                        "Basic ElastiCache usage",
                        "DAX for DynamoDB",
                        "Multi-layer caching approach",
                        "Full caching with CloudFront + DAX",
                    ]),
                ),
            ],
        ),
        domain(
            "Security & Compliance",
            0.20,
            "Function permissions, secrets handling and API authentication.",
            &["Security"],
            vec![
                question(
                    "GA-SEC-001",
                    "How are serverless function permissions managed?",
                    RiskLevel::Critical,
                    ascending([
                        "Overly permissive IAM roles",
                        "Basic role separation",
                        "Least privilege attempted",
                        "IAM roles with resource policies",
                        "Fine-grained IAM with automated review",
                    ]),
                ),
                question(
                    "GA-SEC-002",
                    "What is your approach to secrets management?",
                    RiskLevel::Critical,
                    ascending([
                        "Hardcoded secrets",
                        "Environment variables only",
                        "Parameter Store usage",
                        "Secrets Manager with rotation",
                        "Full secrets management with audit",
                    ]),
                ),
                question(
                    "GA-SEC-003",
                    "How do you handle API security and authentication?",
                    RiskLevel::High,
                    ascending([
                        "No API authentication",
                        "API keys only",
                        "Cognito with basic setup",
                        "Cognito with custom authorizers",
                        "Full identity with WAF protection",
                    ]),
                ),
            ],
        ),
        domain(
            "Observability & DevOps",
            0.15,
            "Monitoring, delivery pipelines and testing of serverless workloads.",
            &["Operational Excellence"],
            vec![
                question(
                    "GA-OBS-001",
                    "What is your serverless monitoring approach?",
                    RiskLevel::Medium,
                    ascending([
                        "Basic CloudWatch metrics only",
                        "CloudWatch with some custom metrics",
                        "CloudWatch Insights enabled",
                        "X-Ray tracing implemented",
                        "Full observability with custom dashboards",
                    ]),
                ),
                question(
                    "GA-OBS-002",
                    "How mature is your serverless CI/CD pipeline?",
                    RiskLevel::High,
                    ascending([
                        "Manual deployments",
                        "Basic CI/CD pipeline",
                        "Multi-stage deployments",
                        "Canary deployments implemented",
                        "Full GitOps with automated rollback",
                    ]),
                ),
                question(
                    "GA-OBS-003",
                    "What is your approach to serverless testing?",
                    RiskLevel::Medium,
                    ascending([
                        "No automated testing",
                        "Unit tests only",
                        "Unit + integration tests",
                        "Full testing with local emulation",
                        "Comprehensive testing with chaos engineering",
                    ]),
                ),
            ],
        ),
    ]
}
