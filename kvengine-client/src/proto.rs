//! Generated gRPC/protobuf types for the `kvengine` service.

tonic::include_proto!("kvengine");
